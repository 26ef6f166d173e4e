use std::env;

use crate::utils::error::AppError;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub storage: StorageBackend,
    pub max_connections: u32,
    /// IP address or hostname; resolved when the listener binds.
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    /// `RUST_ENV=production`; turns on HSTS.
    pub production: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let storage = match lookup("STORAGE_BACKEND") {
            Some(name) => match name.trim().to_lowercase().as_str() {
                "postgres" => StorageBackend::Postgres,
                "memory" => StorageBackend::Memory,
                other => {
                    return Err(AppError::ConfigError(format!(
                        "Unknown STORAGE_BACKEND '{}'",
                        other
                    )))
                }
            },
            None if database_url.is_some() => StorageBackend::Postgres,
            None => StorageBackend::Memory,
        };

        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(AppError::ConfigError(
                "DATABASE_URL must be set for the postgres backend".to_string(),
            ));
        }

        let max_connections =
            parse_or_default(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS);
        let port = parse_or_default(&lookup, "PORT", DEFAULT_PORT);
        let host = lookup("HOST")
            .map(|host| host.trim().to_string())
            .filter(|host| !host.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| cors::DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let production = lookup("RUST_ENV")
            .map(|v| v.to_lowercase() == "production")
            .unwrap_or(false);

        Ok(Self {
            database_url,
            storage,
            max_connections,
            host,
            port,
            cors_allowed_origins,
            production,
        })
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Config: invalid {} '{}', using {}", key, raw, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_to_memory_without_database_url() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:3000", "http://localhost:5173"]
        );
        assert!(!config.production);
    }

    #[test]
    fn test_cors_origins_and_production_flag() {
        let config = config_from(&[
            ("CORS_ALLOWED_ORIGINS", " https://events.example.com, ,https://admin.example.com "),
            ("RUST_ENV", "Production"),
        ])
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://events.example.com", "https://admin.example.com"]
        );
        assert!(config.production);
    }

    #[test]
    fn test_database_url_selects_postgres() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/dev_events")]).unwrap();
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/dev_events")
        );
    }

    #[test]
    fn test_postgres_without_url_is_rejected() {
        let result = config_from(&[("STORAGE_BACKEND", "postgres")]);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result = config_from(&[("STORAGE_BACKEND", "sqlite")]);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = config_from(&[
            ("STORAGE_BACKEND", "Memory"),
            ("PORT", "not-a-port"),
            ("DB_MAX_CONNECTIONS", "-1"),
            ("HOST", "127.0.0.1"),
        ])
        .unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_hostname_is_kept_for_binding() {
        let config = config_from(&[("HOST", " localhost "), ("PORT", "8080")]).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8080);
    }
}
