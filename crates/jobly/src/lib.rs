//! # jobly
//!
//! Data-access layer for the jobly company/job API.
//!
//! ## Features
//!
//! - **Hand-written SQL**: statements are plain SQL templates; only the
//!   request-dependent parts are generated
//! - **Dynamic fragments**: [`build_set_clause`] for partial updates and
//!   [`build_where_clause`] for list filters, both with positional parameters
//! - **Column maps**: API field names are translated to column names through
//!   static [`ColumnMap`]s
//! - **Transaction-friendly**: pass a transaction anywhere a `GenericClient` is expected
//! - **Statement logging**: SQL is logged on the `jobly.sql` target via `tracing`
//!
//! ## Example
//!
//! ```ignore
//! use jobly::{company, DbConfig, FieldUpdates, FilterCriteria};
//!
//! let pool = jobly::create_pool(&DbConfig::from_env()?)?;
//! let client = pool.get().await?;
//!
//! let small = company::find_all(&client, &FilterCriteria::new().max_bound(50)).await?;
//!
//! let updated = company::update(
//!     &client,
//!     "c1",
//!     &FieldUpdates::new().with("numEmployees", 12),
//! )
//! .await?;
//! ```

pub mod client;
pub mod columns;
pub mod company;
pub mod config;
pub mod error;
pub mod prelude;
pub mod row;
pub mod sql;
pub mod trace;
pub mod types;

pub use client::GenericClient;
pub use columns::{ColumnMap, resolve};
pub use config::DbConfig;
pub use error::{JoblyError, JoblyResult};
pub use row::{FromRow, RowExt};
pub use sql::{
    Bound, FieldUpdates, FilterCriteria, Sql, SqlFragment, build_set_clause, build_where_clause,
    sql,
};
pub use types::SqlValue;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::create_pool;
