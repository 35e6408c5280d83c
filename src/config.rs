//! Configuration module
//!
//! The broker reads a single TOML file (default
//! `~/.config/hotel-broker/config.toml`). Every section is optional; missing
//! keys fall back to the defaults below, which match the ports the original
//! deployment used (REST on 3002, SOAP on 3001).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Default config location: `~/.config/hotel-broker/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hotel-broker")
        .join("config.toml")
}

/// Root application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
}

/// Listen addresses for both HTTP surfaces
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// REST API (reservation orchestrator + room registry)
    pub api_host: String,
    pub api_port: u16,
    /// SOAP availability responder
    pub soap_host: String,
    pub soap_port: u16,
    /// Serve the SOAP responder from this process
    pub soap_enabled: bool,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 3002,
            soap_host: "0.0.0.0".to_string(),
            soap_port: 3001,
            soap_enabled: true,
            shutdown_timeout: 30,
        }
    }
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Full connection URL. When empty, `sqlite_path` is used.
    pub url: String,
    /// SQLite file path used when `url` is empty
    pub sqlite_path: String,
    /// Upper bound for the connection pool
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            sqlite_path: "./hotel-broker.db".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseSettings {
    pub fn connection_url(&self) -> String {
        if self.url.trim().is_empty() {
            format!("sqlite://{}?mode=rwc", self.sqlite_path)
        } else {
            self.url.clone()
        }
    }
}

/// Where the orchestrator sends `checkAvailability` calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// SOAP endpoint URL of the availability responder
    pub endpoint: String,
    /// Request timeout in seconds; exceeding it is reported as backend unavailable
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3001/wsdl".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive (overridden by `RUST_LOG`)
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file is not an error: defaults are returned so that a fresh
    /// install starts without any setup.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("backend.endpoint must not be empty".into()));
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Invalid("backend.timeout_secs must be > 0".into()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be > 0".into(),
            ));
        }
        Ok(())
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.server.api_host, self.server.api_port)
    }

    pub fn soap_address(&self) -> String {
        format!("{}:{}", self.server.soap_host, self.server.soap_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.server.api_port, 3002);
        assert_eq!(cfg.server.soap_port, 3001);
        assert_eq!(cfg.backend.endpoint, "http://localhost:3001/wsdl");
        assert_eq!(
            cfg.database.connection_url(),
            "sqlite://./hotel-broker.db?mode=rwc"
        );
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            api_port = 8080

            [backend]
            endpoint = "http://availability.internal/wsdl"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.api_port, 8080);
        assert_eq!(cfg.server.soap_port, 3001);
        assert_eq!(cfg.backend.endpoint, "http://availability.internal/wsdl");
        assert_eq!(cfg.backend.timeout_secs, 10);
        assert_eq!(cfg.logging.format, "json");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn explicit_url_wins_over_sqlite_path() {
        let cfg = AppConfig::from_toml(
            r#"
            [database]
            url = "postgres://broker@localhost/rest_api"
            "#,
        )
        .unwrap();
        assert_eq!(
            cfg.database.connection_url(),
            "postgres://broker@localhost/rest_api"
        );
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = AppConfig::from_toml(
            r#"
            [backend]
            timeout_secs = 0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn load_reads_file_and_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert_eq!(AppConfig::load(&missing).unwrap().server.api_port, 3002);

        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[server]\nsoap_port = 4001").unwrap();
        assert_eq!(AppConfig::load(&path).unwrap().server.soap_port, 4001);
    }
}
