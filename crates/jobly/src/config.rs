//! Database configuration.
//!
//! Settings come from the process environment:
//!
//! | Variable             | Meaning                               | Default |
//! |----------------------|---------------------------------------|---------|
//! | `DATABASE_URL`       | Postgres connection URL               | required |
//! | `TEST_DATABASE_URL`  | Connection URL used by [`DbConfig::for_test`] | falls back to `DATABASE_URL` |
//! | `JOBLY_DB_POOL_SIZE` | Maximum pooled connections            | `16` |
//!
//! Binaries and tests typically call `dotenvy::dotenv().ok()` first so a local
//! `.env` file is honoured.

use crate::error::{JoblyError, JoblyResult};

/// Default maximum number of pooled connections.
pub const DEFAULT_POOL_SIZE: usize = 16;

const DATABASE_URL: &str = "DATABASE_URL";
const TEST_DATABASE_URL: &str = "TEST_DATABASE_URL";
const POOL_SIZE: &str = "JOBLY_DB_POOL_SIZE";

/// Connection settings for the jobly database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub database_url: String,
    pub max_pool_size: usize,
}

impl DbConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_pool_size: DEFAULT_POOL_SIZE,
        }
    }

    /// Override the maximum pool size.
    pub fn max_pool_size(mut self, max_pool_size: usize) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    /// Read settings from the environment.
    pub fn from_env() -> JoblyResult<Self> {
        Self::from_lookup(&[DATABASE_URL], |key| std::env::var(key).ok())
    }

    /// Read settings for the test database (`TEST_DATABASE_URL`, then `DATABASE_URL`).
    pub fn for_test() -> JoblyResult<Self> {
        Self::from_lookup(&[TEST_DATABASE_URL, DATABASE_URL], |key| {
            std::env::var(key).ok()
        })
    }

    /// Build a config from the first non-empty URL among `url_keys`.
    pub(crate) fn from_lookup(
        url_keys: &[&str],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> JoblyResult<Self> {
        let database_url = url_keys
            .iter()
            .filter_map(|&key| lookup(key))
            .find(|url| !url.trim().is_empty())
            .ok_or_else(|| JoblyError::Config(format!("{} is not set", url_keys.join(" or "))))?;

        let max_pool_size = match lookup(POOL_SIZE) {
            None => DEFAULT_POOL_SIZE,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(JoblyError::Config(format!(
                        "{POOL_SIZE} must be a positive integer, got '{raw}'"
                    )));
                }
            },
        };

        Ok(Self {
            database_url,
            max_pool_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn reads_url_with_default_pool_size() {
        let cfg = DbConfig::from_lookup(
            &[DATABASE_URL],
            vars(&[("DATABASE_URL", "postgres://localhost/jobly")]),
        )
        .unwrap();
        assert_eq!(cfg, DbConfig::new("postgres://localhost/jobly"));
        assert_eq!(cfg.max_pool_size, DEFAULT_POOL_SIZE);
    }

    #[test]
    fn missing_url_is_config_error() {
        let err = DbConfig::from_lookup(&[DATABASE_URL], vars(&[])).unwrap_err();
        assert!(matches!(err, JoblyError::Config(_)));
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_url_takes_precedence() {
        let cfg = DbConfig::from_lookup(
            &[TEST_DATABASE_URL, DATABASE_URL],
            vars(&[
                ("DATABASE_URL", "postgres://localhost/jobly"),
                ("TEST_DATABASE_URL", "postgres://localhost/jobly_test"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.database_url, "postgres://localhost/jobly_test");
    }

    #[test]
    fn blank_test_url_falls_back() {
        let cfg = DbConfig::from_lookup(
            &[TEST_DATABASE_URL, DATABASE_URL],
            vars(&[
                ("DATABASE_URL", "postgres://localhost/jobly"),
                ("TEST_DATABASE_URL", "  "),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.database_url, "postgres://localhost/jobly");
    }

    #[test]
    fn pool_size_is_parsed() {
        let cfg = DbConfig::from_lookup(
            &[DATABASE_URL],
            vars(&[("DATABASE_URL", "postgres://db"), ("JOBLY_DB_POOL_SIZE", "4")]),
        )
        .unwrap();
        assert_eq!(cfg.max_pool_size, 4);
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let err = DbConfig::from_lookup(
            &[DATABASE_URL],
            vars(&[("DATABASE_URL", "postgres://db"), ("JOBLY_DB_POOL_SIZE", "0")]),
        )
        .unwrap_err();
        assert!(matches!(err, JoblyError::Config(_)));
    }
}
