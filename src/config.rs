use std::net::SocketAddr;
use thiserror::Error;

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Default per-route, per-client request quota
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 100;

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Process configuration read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongo_uri: String,
    pub database_name: String,
    pub bind_addr: SocketAddr,
    pub rate_limit_per_minute: u32,
}

impl AppConfig {
    /// Reads configuration from process environment variables
    ///
    /// # Variables
    /// - `MONGO_URI` (required)
    /// - `DATABASE_NAME` (required)
    /// - `BIND_ADDR` (default `0.0.0.0:8000`)
    /// - `RATE_LIMIT_PER_MINUTE` (default `100`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let mongo_uri = required("MONGO_URI")?;
        let database_name = required("DATABASE_NAME")?;

        let bind_addr: SocketAddr = match lookup("BIND_ADDR") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "BIND_ADDR",
                value,
            })?,
            None => DEFAULT_BIND_ADDR.parse().map_err(|_| ConfigError::Invalid {
                name: "BIND_ADDR",
                value: DEFAULT_BIND_ADDR.to_string(),
            })?,
        };

        let rate_limit_per_minute = match lookup("RATE_LIMIT_PER_MINUTE") {
            Some(value) => match value.parse::<u32>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "RATE_LIMIT_PER_MINUTE",
                        value,
                    })
                }
            },
            None => DEFAULT_RATE_LIMIT_PER_MINUTE,
        };

        Ok(Self {
            mongo_uri,
            database_name,
            bind_addr,
            rate_limit_per_minute,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config = AppConfig::from_lookup(lookup(&[
            ("MONGO_URI", "mongodb://localhost:27017"),
            ("DATABASE_NAME", "school"),
        ]))
        .unwrap();

        assert_eq!(config.database_name, "school");
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.rate_limit_per_minute, 100);
    }

    #[test]
    fn missing_uri_fails() {
        let result = AppConfig::from_lookup(lookup(&[("DATABASE_NAME", "school")]));
        assert!(matches!(result, Err(ConfigError::Missing("MONGO_URI"))));
    }

    #[test]
    fn empty_database_name_fails() {
        let result = AppConfig::from_lookup(lookup(&[
            ("MONGO_URI", "mongodb://localhost:27017"),
            ("DATABASE_NAME", ""),
        ]));
        assert!(matches!(result, Err(ConfigError::Missing("DATABASE_NAME"))));
    }

    #[test]
    fn invalid_rate_limit_fails() {
        for value in ["0", "-1", "many"] {
            let result = AppConfig::from_lookup(lookup(&[
                ("MONGO_URI", "mongodb://localhost:27017"),
                ("DATABASE_NAME", "school"),
                ("RATE_LIMIT_PER_MINUTE", value),
            ]));
            assert!(matches!(result, Err(ConfigError::Invalid { .. })));
        }
    }

    #[test]
    fn overrides_apply() {
        let config = AppConfig::from_lookup(lookup(&[
            ("MONGO_URI", "mongodb://db:27017"),
            ("DATABASE_NAME", "school"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("RATE_LIMIT_PER_MINUTE", "5"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.rate_limit_per_minute, 5);
    }
}
