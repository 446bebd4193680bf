//! Tracker configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `PORT` - Listen port (default: 8000)
//! - `TRACKER_HOST` - Bind address (default: 0.0.0.0)
//! - `TRACKER_DATA_DIR` - Directory holding `notification_prefs.json` (default: data)
//! - `TRACKER_SHIPMENTS_FILE` - JSON array of shipments replacing the demo dataset
//! - `TRACKER_STATIC_DIR` - Directory served for non-API paths
//! - `TRACKER_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// File name of the preference document inside the data directory.
pub const PREFERENCES_FILE_NAME: &str = "notification_prefs.json";

const DEFAULT_PORT: &str = "8000";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_DATA_DIR: &str = "data";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Tracker application configuration.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory for persisted state
    pub data_dir: PathBuf,
    /// Optional shipment dataset replacing the built-in demo records
    pub shipments_file: Option<PathBuf>,
    /// Optional directory of UI assets served for non-API paths
    pub static_dir: Option<PathBuf>,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl TrackerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let get_optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = get_or_default("PORT", DEFAULT_PORT)
            .trim()
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;
        let host = get_or_default("TRACKER_HOST", DEFAULT_HOST)
            .trim()
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("TRACKER_HOST".to_string(), e.to_string()))?;

        Ok(Self {
            host,
            port,
            data_dir: PathBuf::from(get_or_default("TRACKER_DATA_DIR", DEFAULT_DATA_DIR)),
            shipments_file: get_optional("TRACKER_SHIPMENTS_FILE").map(PathBuf::from),
            static_dir: get_optional("TRACKER_STATIC_DIR").map(PathBuf::from),
            log_json: get_optional("TRACKER_LOG_JSON").is_some(),
            sentry_dsn: get_optional("SENTRY_DSN"),
            sentry_environment: get_optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Path of the notification preference document.
    #[must_use]
    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir.join(PREFERENCES_FILE_NAME)
    }
}
