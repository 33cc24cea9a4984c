//! Dynamic SQL fragments.
//!
//! The data-access layer writes its statements by hand and only splices in the
//! parts that depend on the request:
//!
//! - [`build_set_clause`] renders the `SET` list of a partial update.
//! - [`build_where_clause`] renders an optional `WHERE` clause for list filters.
//!
//! Both return a [`SqlFragment`] whose `$1..$N` placeholders line up with its
//! `values`. Values are always bound; column names come from a [`ColumnMap`]
//! and are quoted, never parameterized.
//!
//! # Example
//!
//! ```ignore
//! use jobly::{build_set_clause, FieldUpdates};
//!
//! let updates = FieldUpdates::new().with("numEmployees", 12);
//! let set = build_set_clause(&updates, &COMPANY_UPDATE_COLUMNS)?;
//! let sql = format!(
//!     "UPDATE companies SET {} WHERE handle = ${}",
//!     set.fragment,
//!     set.next_placeholder()
//! );
//! ```
//!
//! [`ColumnMap`]: crate::ColumnMap

mod builder;
mod filter;
mod fragment;
mod partial_update;


pub use builder::Sql;
pub use filter::{
    Bound, FilterCriteria, MAX_BOUND_FIELD, MIN_BOUND_FIELD, NAME_PATTERN_FIELD, build_where_clause,
};
pub use fragment::SqlFragment;
pub use partial_update::{FieldUpdates, build_set_clause};

/// Start building a SQL fragment.
pub fn sql(initial_sql: impl Into<String>) -> Sql {
    Sql::new(initial_sql)
}
