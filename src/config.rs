//! Service configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). The five `DB_*` connection keys are required; everything
//! else falls back to a default.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Default bind address. The service historically listened on `:8080`.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Raw value as found in the environment.
        value: String,
        /// Parser message.
        reason: String,
    },
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`ServerConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// PostgreSQL connection settings.
    pub database: DatabaseConfig,
}

/// PostgreSQL connection settings.
///
/// The `Debug` impl redacts the password.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Server host name or address (`DB_HOST`).
    pub host: String,
    /// Login role (`DB_USER`).
    pub user: String,
    /// Login password (`DB_PASSWORD`), may be empty.
    pub password: String,
    /// Database name (`DB_NAME`).
    pub name: String,
    /// Server port (`DB_PORT`).
    pub port: u16,
    /// TLS negotiation mode (`DB_SSLMODE`, default `disable`).
    pub ssl_mode: PgSslMode,
    /// Maximum pool size.
    pub max_connections: u32,
    /// Minimum idle connections kept open.
    pub min_connections: u32,
    /// Timeout for acquiring a connection.
    pub connect_timeout: Duration,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("port", &self.port)
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl DatabaseConfig {
    /// Builds sqlx connect options from the individual settings.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(self.ssl_mode)
    }

    /// Connection target without credentials, for log lines.
    #[must_use]
    pub fn redacted_target(&self) -> String {
        format!("{}@{}:{}/{}", self.user, self.host, self.port, self.name)
    }
}

impl ServerConfig {
    /// Loads configuration from the process environment.
    ///
    /// Calls `dotenvy::dotenv().ok()` first to optionally load a `.env`
    /// file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required `DB_*` variable is absent
    /// or any variable holds an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = parse_or(&lookup, "LISTEN_ADDR", DEFAULT_LISTEN_ADDR)?;

        let database = DatabaseConfig {
            host: required(&lookup, "DB_HOST")?,
            user: required(&lookup, "DB_USER")?,
            password: required(&lookup, "DB_PASSWORD")?,
            name: required(&lookup, "DB_NAME")?,
            port: parse_value("DB_PORT", required(&lookup, "DB_PORT")?)?,
            ssl_mode: parse_or(&lookup, "DB_SSLMODE", "disable")?,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", "10")?,
            min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", "0")?,
            connect_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_CONNECT_TIMEOUT_SECS",
                "5",
            )?),
        };

        Ok(Self {
            listen_addr,
            database,
        })
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or(ConfigError::Missing(key))
}

/// Parses `key` as `T`, using `default` when the variable is unset.
fn parse_or<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    parse_value(key, raw)
}

fn parse_value<T>(key: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value: raw,
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn base_env() -> HashMap<String, String> {
        env(&[
            ("DB_HOST", "db.internal"),
            ("DB_USER", "qr"),
            ("DB_PASSWORD", "s3cret"),
            ("DB_NAME", "qrninja"),
            ("DB_PORT", "5432"),
        ])
    }

    fn load(vars: &HashMap<String, String>) -> Result<ServerConfig, ConfigError> {
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn loads_required_keys_with_defaults() {
        let Ok(config) = load(&base_env()) else {
            panic!("config should load");
        };
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.name, "qrninja");
        assert!(matches!(config.database.ssl_mode, PgSslMode::Disable));
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn each_db_key_is_required() {
        for key in ["DB_HOST", "DB_USER", "DB_PASSWORD", "DB_NAME", "DB_PORT"] {
            let mut vars = base_env();
            vars.remove(key);
            match load(&vars) {
                Err(ConfigError::Missing(missing)) => assert_eq!(missing, key),
                other => panic!("expected missing {key}, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_password_is_allowed() {
        let mut vars = base_env();
        vars.insert("DB_PASSWORD".to_string(), String::new());
        assert!(load(&vars).is_ok());
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let mut vars = base_env();
        vars.insert("DB_PORT".to_string(), "postgres".to_string());
        let Err(ConfigError::Invalid { key, value, .. }) = load(&vars) else {
            panic!("expected invalid port");
        };
        assert_eq!(key, "DB_PORT");
        assert_eq!(value, "postgres");
    }

    #[test]
    fn overrides_are_applied() {
        let mut vars = base_env();
        vars.insert("LISTEN_ADDR".to_string(), "127.0.0.1:9000".to_string());
        vars.insert("DB_SSLMODE".to_string(), "require".to_string());
        vars.insert("DB_MAX_CONNECTIONS".to_string(), "3".to_string());
        let Ok(config) = load(&vars) else {
            panic!("config should load");
        };
        assert_eq!(config.listen_addr.port(), 9000);
        assert!(matches!(config.database.ssl_mode, PgSslMode::Require));
        assert_eq!(config.database.max_connections, 3);
    }

    #[test]
    fn debug_output_redacts_password() {
        let Ok(config) = load(&base_env()) else {
            panic!("config should load");
        };
        let rendered = format!("{:?}", config.database);
        assert!(!rendered.contains("s3cret"));
        assert_eq!(config.database.redacted_target(), "qr@db.internal:5432/qrninja");
    }
}
