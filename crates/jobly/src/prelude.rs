//! Convenient imports for typical `jobly` usage.
//!
//! ```ignore
//! use jobly::prelude::*;
//! ```

pub use crate::{
    Bound, ColumnMap, DbConfig, FieldUpdates, FilterCriteria, FromRow, GenericClient, JoblyError,
    JoblyResult, RowExt, SqlFragment, SqlValue, build_set_clause, build_where_clause,
};

#[cfg(feature = "pool")]
pub use crate::create_pool;
