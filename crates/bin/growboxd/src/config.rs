//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `growbox.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

/// Largest accepted UTC offset magnitude, exclusive.
const MAX_OFFSET_MINUTES: i32 = 24 * 60;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Write retry settings.
    pub store: StoreConfig,
    /// Schedule evaluation settings.
    pub schedule: ScheduleConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
    /// Seconds a connection waits on a locked database.
    pub busy_timeout_secs: u64,
    /// Pool size.
    pub max_connections: u32,
}

/// Retry budget for writes that hit a locked database.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Total attempts, including the first one.
    pub retry_attempts: u32,
    /// Fixed pause between attempts.
    pub retry_backoff_ms: u64,
}

/// Schedule evaluation configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Fixed offset east of UTC used for the time of day. Host local time
    /// when unset.
    pub utc_offset_minutes: Option<i32>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `growbox.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("growbox.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("GROWBOX_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("GROWBOX_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("GROWBOX_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("GROWBOX_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(attempts) = var("GROWBOX_RETRY_ATTEMPTS").and_then(|val| val.parse().ok()) {
            self.store.retry_attempts = attempts;
        }
        if let Some(offset) = var("GROWBOX_UTC_OFFSET_MINUTES").and_then(|val| val.parse().ok()) {
            self.schedule.utc_offset_minutes = Some(offset);
        }
        if let Some(val) = var("GROWBOX_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.store.retry_attempts == 0 {
            return Err(ConfigError::Validation(
                "retry_attempts must be at least 1".to_string(),
            ));
        }
        if let Some(offset) = self.schedule.utc_offset_minutes {
            if offset.unsigned_abs() >= MAX_OFFSET_MINUTES.unsigned_abs() {
                return Err(ConfigError::Validation(format!(
                    "utc_offset_minutes {offset} is outside ±24h"
                )));
            }
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Return the busy timeout applied to every connection.
    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.database.busy_timeout_secs)
    }

    /// Return the pause between write attempts.
    #[must_use]
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.store.retry_backoff_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:growbox.db?mode=rwc".to_string(),
            busy_timeout_secs: 30,
            max_connections: 5,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            retry_attempts: 5,
            retry_backoff_ms: 1000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "growboxd=debug,growbox=debug,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overridden(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).cloned());
        config
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.url, "sqlite:growbox.db?mode=rwc");
        assert_eq!(config.busy_timeout(), Duration::from_secs(30));
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.store.retry_attempts, 5);
        assert_eq!(config.retry_backoff(), Duration::from_secs(1));
        assert!(config.schedule.utc_offset_minutes.is_none());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [database]
            url = 'sqlite:test.db'
            busy_timeout_secs = 5
            max_connections = 2

            [store]
            retry_attempts = 3
            retry_backoff_ms = 250

            [schedule]
            utc_offset_minutes = 120

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.busy_timeout(), Duration::from_secs(5));
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.store.retry_attempts, 3);
        assert_eq!(config.retry_backoff(), Duration::from_millis(250));
        assert_eq!(config.schedule.utc_offset_minutes, Some(120));
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [server]
            port = 8080
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url, "sqlite:growbox.db?mode=rwc");
        assert_eq!(config.store.retry_attempts, 5);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_apply_environment_overrides() {
        let config = overridden(&[
            ("GROWBOX_HOST", "127.0.0.1"),
            ("GROWBOX_PORT", "8081"),
            ("GROWBOX_DATABASE_URL", "sqlite::memory:"),
            ("GROWBOX_RETRY_ATTEMPTS", "2"),
            ("GROWBOX_UTC_OFFSET_MINUTES", "-300"),
            ("GROWBOX_LOG", "info"),
        ]);
        assert_eq!(config.bind_addr(), "127.0.0.1:8081");
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.store.retry_attempts, 2);
        assert_eq!(config.schedule.utc_offset_minutes, Some(-300));
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn should_let_bind_override_host_and_port() {
        let config = overridden(&[("GROWBOX_PORT", "8081"), ("GROWBOX_BIND", "10.0.0.2:7000")]);
        assert_eq!(config.bind_addr(), "10.0.0.2:7000");
    }

    #[test]
    fn should_prefer_rust_log_over_growbox_log() {
        let config = overridden(&[("GROWBOX_LOG", "info"), ("RUST_LOG", "trace")]);
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparsable_numeric_overrides() {
        let config = overridden(&[("GROWBOX_PORT", "http"), ("GROWBOX_RETRY_ATTEMPTS", "many")]);
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.store.retry_attempts, 5);
    }

    #[test]
    fn should_accept_default_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_retry_attempts() {
        let mut config = Config::default();
        config.store.retry_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_offset_of_a_full_day() {
        let mut config = Config::default();
        config.schedule.utc_offset_minutes = Some(-1440);
        assert!(config.validate().is_err());

        config.schedule.utc_offset_minutes = Some(1439);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_reject_minimum_integer_offset_without_overflow() {
        let config = overridden(&[("GROWBOX_UTC_OFFSET_MINUTES", "-2147483648")]);
        assert_eq!(config.schedule.utc_offset_minutes, Some(i32::MIN));
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_format_bind_addr() {
        assert_eq!(Config::default().bind_addr(), "0.0.0.0:5000");
    }
}
