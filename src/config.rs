/*!
 * Configuration types for clusterdash
 */

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{DashError, Result};

/// Main configuration for the dashboard client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Base URL of the dashboard backend
    pub api_url: String,

    /// Bearer token sent with every API request
    pub token: Option<String>,

    /// Id of the signed-in user, used to list their projects
    pub user_id: i64,

    /// Mount point of the cluster dashboard routes
    pub dashboard_base: String,

    /// Per-request timeout in seconds (None = no timeout)
    pub request_timeout_secs: Option<u64>,

    /// Log level for diagnostic output
    pub log_level: LogLevel,

    /// Log file path (None = stderr)
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging (shorthand for log_level = debug)
    pub verbose: bool,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            token: None,
            user_id: 0,
            dashboard_base: "/cluster-dashboard".to_string(),
            request_timeout_secs: None,
            log_level: LogLevel::Info,
            log_file: None,
            verbose: false,
        }
    }
}

impl DashConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|source| DashError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| DashError::Config(e.to_string()))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Check values the client cannot work without
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(DashError::Config("api_url must not be empty".to_string()));
        }
        if !self.dashboard_base.is_empty() && !self.dashboard_base.starts_with('/') {
            return Err(DashError::Config(format!(
                "dashboard_base must start with '/': {}",
                self.dashboard_base
            )));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(DashError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors
    Error,

    /// Warnings and errors
    Warn,

    /// Info, warnings, and errors
    #[default]
    Info,

    /// Debug and above
    Debug,

    /// All messages including traces
    Trace,
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
