use crate::types::SqlValue;
use std::fmt;
use tokio_postgres::types::ToSql;

/// A rendered SQL fragment plus the values for its placeholders.
///
/// `fragment` contains `$1..$N` where `N == values.len()`, numbered in the
/// order the values appear.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFragment {
    pub fragment: String,
    pub values: Vec<SqlValue>,
}

impl SqlFragment {
    /// Index of the first placeholder a caller may append after this fragment.
    ///
    /// ```ignore
    /// let set = build_set_clause(&updates, &COLUMNS)?;
    /// let sql = format!("UPDATE t SET {} WHERE id = ${}", set, set.next_placeholder());
    /// ```
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
    }
}

impl fmt::Display for SqlFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fragment)
    }
}
