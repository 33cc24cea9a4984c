use super::fragment::SqlFragment;
use crate::types::SqlValue;
use std::fmt::Write;

#[derive(Debug, Clone)]
enum SqlPart {
    Raw(String),
    Param,
}

/// A parameter-safe SQL fragment writer.
///
/// `Sql` stores SQL pieces and bind values separately and generates `$1, $2, ...`
/// placeholders when rendered, so callers never track indices by hand.
#[must_use]
#[derive(Debug, Clone, Default)]
pub struct Sql {
    parts: Vec<SqlPart>,
    params: Vec<SqlValue>,
}

impl Sql {
    /// Create a new writer with an initial SQL fragment.
    pub fn new(initial_sql: impl Into<String>) -> Self {
        Self {
            parts: vec![SqlPart::Raw(initial_sql.into())],
            params: Vec::new(),
        }
    }

    /// Create an empty writer.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append raw SQL (no parameters).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if sql.is_empty() {
            return self;
        }

        match self.parts.last_mut() {
            Some(SqlPart::Raw(last)) => last.push_str(sql),
            _ => self.parts.push(SqlPart::Raw(sql.to_string())),
        }
        self
    }

    /// Append a parameter placeholder and bind its value.
    pub fn push_bind(&mut self, value: impl Into<SqlValue>) -> &mut Self {
        self.parts.push(SqlPart::Param);
        self.params.push(value.into());
        self
    }

    /// Append a double-quoted column name.
    ///
    /// Column names come from server-side maps and are not validated; embedded
    /// `"` characters are doubled so the quoting stays balanced.
    pub fn push_column(&mut self, column: &str) -> &mut Self {
        let mut quoted = String::with_capacity(column.len() + 2);
        quoted.push('"');
        for ch in column.chars() {
            if ch == '"' {
                quoted.push('"');
            }
            quoted.push(ch);
        }
        quoted.push('"');
        self.push(&quoted)
    }

    /// Number of bound values (and therefore placeholders) so far.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Render SQL with `$1, $2, ...` placeholders.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        let mut idx: usize = 0;

        for part in &self.parts {
            match part {
                SqlPart::Raw(s) => out.push_str(s),
                SqlPart::Param => {
                    idx += 1;
                    let _ = write!(&mut out, "${}", idx);
                }
            }
        }
        out
    }

    /// Render and hand over the bind values.
    pub fn into_fragment(self) -> SqlFragment {
        SqlFragment {
            fragment: self.to_sql(),
            values: self.params,
        }
    }
}
