//! `WHERE` clause builder for list filters.
//!
//! [`FilterCriteria`] carries up to three optional criteria. They are always
//! rendered in the same order (lower bound, upper bound, name pattern) so the
//! placeholder numbering for a given set of criteria never changes.

use super::builder::Sql;
use super::fragment::SqlFragment;
use crate::columns::ColumnMap;
use crate::types::SqlValue;
use serde::{Deserialize, Serialize};

/// Field identifier looked up in the column map for [`FilterCriteria::min_bound`].
pub const MIN_BOUND_FIELD: &str = "minBound";
/// Field identifier looked up in the column map for [`FilterCriteria::max_bound`].
pub const MAX_BOUND_FIELD: &str = "maxBound";
/// Field identifier looked up in the column map for [`FilterCriteria::name_pattern`].
pub const NAME_PATTERN_FIELD: &str = "namePattern";

/// A numeric filter bound.
///
/// Bounds are numbers, not only integers: `2.5` is kept as given and bound
/// as-is. A whole float still binds to an integer column; a fractional one
/// against an integer column fails with [`JoblyError::InvalidInput`] when the
/// statement runs.
///
/// [`JoblyError::InvalidInput`]: crate::JoblyError::InvalidInput
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bound {
    Int(i64),
    Float(f64),
}

impl From<i32> for Bound {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for Bound {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Bound {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Bound> for SqlValue {
    fn from(bound: Bound) -> Self {
        match bound {
            Bound::Int(v) => Self::Int(v),
            Bound::Float(v) => Self::Float(v),
        }
    }
}

/// Optional list-filter criteria.
///
/// Deserializes from camelCase keys; the company query-string names
/// (`minEmployees`, `maxEmployees`, `nameLike`) are accepted as aliases.
/// The bounds are independent: `min_bound > max_bound` is not rejected here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Inclusive lower bound.
    #[serde(default, alias = "minEmployees", skip_serializing_if = "Option::is_none")]
    pub min_bound: Option<Bound>,
    /// Inclusive upper bound.
    #[serde(default, alias = "maxEmployees", skip_serializing_if = "Option::is_none")]
    pub max_bound: Option<Bound>,
    /// Raw substring; `%` wildcards are added by the builder.
    #[serde(default, alias = "nameLike", skip_serializing_if = "Option::is_none")]
    pub name_pattern: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_bound(mut self, min: impl Into<Bound>) -> Self {
        self.min_bound = Some(min.into());
        self
    }

    pub fn max_bound(mut self, max: impl Into<Bound>) -> Self {
        self.max_bound = Some(max.into());
        self
    }

    pub fn name_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.name_pattern = Some(pattern.into());
        self
    }

    /// `true` when no criterion is present.
    pub fn is_empty(&self) -> bool {
        self.min_bound.is_none() && self.max_bound.is_none() && self.name_pattern.is_none()
    }
}

/// Build the `WHERE` fragment for `criteria`.
///
/// Returns `None` when no criterion is present so the caller can leave the
/// `WHERE` keyword out entirely. Otherwise the fragment starts with `WHERE `
/// and joins the present criteria with ` AND `:
///
/// - lower bound: `"<col>">=$n`
/// - upper bound: `"<col>"<=$n`
/// - name pattern: `"<col>" ILIKE $n`, bound as `%<pattern>%`
pub fn build_where_clause(criteria: &FilterCriteria, columns: &ColumnMap) -> Option<SqlFragment> {
    let mut conditions: Vec<(&str, &str, SqlValue)> = Vec::with_capacity(3);

    if let Some(min) = criteria.min_bound {
        conditions.push((columns.resolve(MIN_BOUND_FIELD), ">=", min.into()));
    }
    if let Some(max) = criteria.max_bound {
        conditions.push((columns.resolve(MAX_BOUND_FIELD), "<=", max.into()));
    }
    if let Some(pattern) = &criteria.name_pattern {
        conditions.push((
            columns.resolve(NAME_PATTERN_FIELD),
            " ILIKE ",
            format!("%{pattern}%").into(),
        ));
    }

    if conditions.is_empty() {
        return None;
    }

    let mut sql = Sql::new("WHERE ");
    for (i, (column, op, value)) in conditions.into_iter().enumerate() {
        if i > 0 {
            sql.push(" AND ");
        }
        sql.push_column(column).push(op).push_bind(value);
    }

    let clause = sql.into_fragment();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "jobly.sql",
        fragment = %clause.fragment,
        param_count = clause.values.len(),
        "built WHERE clause"
    );

    Some(clause)
}
