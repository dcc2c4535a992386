//! Configuration loading and representation.
//!
//! Everything comes from environment variables; see [`AppConfig::from_env`].

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

use stackfood_observability::LogFormat;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server: ServerConfig,
    /// `None` runs the service on the in-memory store.
    pub database: Option<DatabaseConfig>,
    /// Insert the demo catalog when the store has no categories.
    pub seed_catalog: bool,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Read `HOST`, `PORT`, `DATABASE_URL`, `DB_MAX_CONNECTIONS`,
    /// `SEED_CATALOG` and `LOG_FORMAT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = parse_or(var("HOST"), "HOST", IpAddr::from([0, 0, 0, 0]))?;
        let port = parse_or(var("PORT"), "PORT", 8080)?;

        let database = match var("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_or(var("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 10)?,
            }),
            None => None,
        };

        let seed_catalog = match var("SEED_CATALOG") {
            Some(v) => parse_flag("SEED_CATALOG", &v)?,
            None => true,
        };

        let log_format = parse_or(var("LOG_FORMAT"), "LOG_FORMAT", LogFormat::Json)?;

        Ok(Self {
            server: ServerConfig { host, port },
            database,
            seed_catalog,
            log_format,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_run_in_memory_on_8080() {
        let config = load(&[]).unwrap();
        assert_eq!(config.server.bind_addr().to_string(), "0.0.0.0:8080");
        assert!(config.database.is_none());
        assert!(config.seed_catalog);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn database_url_enables_postgres_with_pool_size() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/stackfood"),
            ("DB_MAX_CONNECTIONS", "4"),
        ])
        .unwrap();

        let db = config.database.unwrap();
        assert_eq!(db.url, "postgres://localhost/stackfood");
        assert_eq!(db.max_connections, 4);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = load(&[("PORT", " "), ("DATABASE_URL", "")]).unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.database.is_none());
    }

    #[test]
    fn invalid_values_name_the_key() {
        assert_eq!(
            load(&[("PORT", "eighty")]).unwrap_err(),
            ConfigError::Invalid {
                key: "PORT",
                value: "eighty".into()
            }
        );
        assert!(matches!(
            load(&[("SEED_CATALOG", "maybe")]),
            Err(ConfigError::Invalid { key: "SEED_CATALOG", .. })
        ));
        assert!(matches!(
            load(&[("LOG_FORMAT", "xml")]),
            Err(ConfigError::Invalid { key: "LOG_FORMAT", .. })
        ));
    }

    #[test]
    fn seed_and_log_format_are_configurable() {
        let config = load(&[("SEED_CATALOG", "false"), ("LOG_FORMAT", "pretty")]).unwrap();
        assert!(!config.seed_catalog);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }
}
