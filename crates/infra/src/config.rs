//! Configuration loading and representation.
//!
//! Values come from environment variables. `from_lookup` takes any lookup
//! function so tests never touch the process environment.

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}='{value}' is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    /// `None` selects the in-memory stores.
    pub database: Option<DatabaseConfig>,
    /// Seed demo locations and items into the in-memory store.
    pub seed_demo: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_raw = get("WAREFLOW_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            var: "WAREFLOW_BIND_ADDR",
            value: bind_raw.clone(),
            reason: e.to_string(),
        })?;

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });

        let database = match get("DATABASE_URL") {
            Some(url) => {
                let max_connections = match get("WAREFLOW_DB_MAX_CONNECTIONS") {
                    Some(raw) => match raw.parse::<u32>() {
                        Ok(n) if n > 0 => n,
                        _ => {
                            return Err(ConfigError::Invalid {
                                var: "WAREFLOW_DB_MAX_CONNECTIONS",
                                value: raw,
                                reason: "expected a positive integer".to_string(),
                            });
                        }
                    },
                    None => DEFAULT_MAX_CONNECTIONS,
                };
                Some(DatabaseConfig { url, max_connections })
            }
            None => None,
        };

        let seed_demo = match get("WAREFLOW_SEED_DEMO") {
            Some(raw) => parse_flag("WAREFLOW_SEED_DEMO", &raw)?,
            None => false,
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            database,
            seed_demo,
        })
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: raw.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_select_in_memory_stores() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(cfg.jwt_secret, DEV_JWT_SECRET);
        assert_eq!(cfg.database, None);
        assert!(!cfg.seed_demo);
    }

    #[test]
    fn database_url_enables_postgres_with_pool_size() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://localhost/wareflow"),
            ("WAREFLOW_DB_MAX_CONNECTIONS", "4"),
            ("WAREFLOW_SEED_DEMO", "yes"),
        ])
        .unwrap();
        assert_eq!(
            cfg.database,
            Some(DatabaseConfig {
                url: "postgres://localhost/wareflow".to_string(),
                max_connections: 4,
            })
        );
        assert!(cfg.seed_demo);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = config(&[("WAREFLOW_BIND_ADDR", "not-an-addr")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "WAREFLOW_BIND_ADDR", .. }));

        let err = config(&[("DATABASE_URL", "postgres://x"), ("WAREFLOW_DB_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "WAREFLOW_DB_MAX_CONNECTIONS", .. }));

        let err = config(&[("WAREFLOW_SEED_DEMO", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "WAREFLOW_SEED_DEMO", .. }));
    }
}
