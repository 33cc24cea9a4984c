//! Connection pool utilities

use crate::config::DbConfig;
use crate::error::{JoblyError, JoblyResult};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;

/// Create a connection pool from a [`DbConfig`].
///
/// Uses `NoTls` and fast recycling.
///
/// # Example
///
/// ```ignore
/// let pool = jobly::create_pool(&DbConfig::from_env()?)?;
/// let client = pool.get().await?;
/// let companies = jobly::company::find_all(&client, &FilterCriteria::new()).await?;
/// ```
pub fn create_pool(config: &DbConfig) -> JoblyResult<Pool> {
    let pg_config: tokio_postgres::Config = config
        .database_url
        .parse()
        .map_err(|e: tokio_postgres::Error| JoblyError::Connection(e.to_string()))?;

    let mgr = Manager::from_config(pg_config, NoTls, default_manager_config());
    Pool::builder(mgr)
        .max_size(config.max_pool_size)
        .build()
        .map_err(|e| JoblyError::Pool(e.to_string()))
}

fn default_manager_config() -> ManagerConfig {
    ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    }
}
