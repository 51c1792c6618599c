//! Catalog database configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, then turned into a [`DbConfig`].
//!
//! | Variable                        | Default            |
//! |---------------------------------|--------------------|
//! | `SHOP_DATABASE_PATH`            | `./shop.db`        |
//! | `SHOP_DB_MAX_CONNECTIONS`       | `5`                |
//! | `SHOP_DB_MIN_CONNECTIONS`       | `1`                |
//! | `SHOP_DB_CONNECT_TIMEOUT_SECS`  | `30`               |
//! | `SHOP_DB_RUN_MIGRATIONS`        | `true`             |

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::pool::DbConfig;

/// Catalog database configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// SQLite database file (or `:memory:`)
    pub database_path: String,

    /// Pool upper bound
    pub max_connections: u32,

    /// Pool lower bound
    pub min_connections: u32,

    /// Acquire timeout in seconds
    pub connect_timeout_secs: u64,

    /// Apply embedded migrations on connect
    pub run_migrations: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            database_path: "./shop.db".to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 30,
            run_migrations: true,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn load_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CatalogConfig::default();

        let config = CatalogConfig {
            database_path: lookup("SHOP_DATABASE_PATH").unwrap_or(defaults.database_path),

            max_connections: parse_or(&lookup, "SHOP_DB_MAX_CONNECTIONS", defaults.max_connections)?,

            min_connections: parse_or(&lookup, "SHOP_DB_MIN_CONNECTIONS", defaults.min_connections)?,

            connect_timeout_secs: parse_or(
                &lookup,
                "SHOP_DB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,

            run_migrations: parse_or(&lookup, "SHOP_DB_RUN_MIGRATIONS", defaults.run_migrations)?,
        };

        if config.database_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("SHOP_DATABASE_PATH".to_string()));
        }

        if config.max_connections == 0 || config.min_connections > config.max_connections {
            return Err(ConfigError::InvalidValue("SHOP_DB_MIN_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Builds the pool configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .run_migrations(self.run_migrations)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::load_from(lookup(&[])).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = CatalogConfig::load_from(lookup(&[
            ("SHOP_DATABASE_PATH", ":memory:"),
            ("SHOP_DB_MAX_CONNECTIONS", "1"),
            ("SHOP_DB_RUN_MIGRATIONS", "false"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, ":memory:");
        assert_eq!(config.max_connections, 1);
        assert!(!config.run_migrations);

        let db_config = config.db_config();
        assert!(db_config.is_in_memory());
        assert!(!db_config.run_migrations);
    }

    #[test]
    fn test_invalid_values() {
        let err = CatalogConfig::load_from(lookup(&[("SHOP_DB_MAX_CONNECTIONS", "many")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == "SHOP_DB_MAX_CONNECTIONS"));

        let err = CatalogConfig::load_from(lookup(&[
            ("SHOP_DB_MAX_CONNECTIONS", "2"),
            ("SHOP_DB_MIN_CONNECTIONS", "3"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));

        let err = CatalogConfig::load_from(lookup(&[("SHOP_DATABASE_PATH", " ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(_)));
    }
}
