/*!
 * Error types for clusterdash
 */

use std::path::PathBuf;

use thiserror::Error;

use crate::provisioner::CreateProjectError;

pub type Result<T> = std::result::Result<T, DashError>;

/// Exit code constants for structured process exit
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;

#[derive(Error, Debug)]
pub enum DashError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file could not be parsed
    #[error("Invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Api(#[from] clusterdash_api::ApiError),

    #[error(transparent)]
    CreateProject(#[from] CreateProjectError),

    /// Path is not under the dashboard mount
    #[error("Path {path} is outside the dashboard mounted at {base}")]
    Unrouted { base: String, path: String },
}

impl DashError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DashError::Config(_) | DashError::ConfigParse { .. } => EXIT_CONFIG,
            _ => EXIT_FAILURE,
        }
    }
}
