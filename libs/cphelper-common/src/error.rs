use std::path::PathBuf;
use thiserror::Error;

/// Failures shared by every cphelper operation
///
/// `InvalidConfig` and `InvalidEnv` stop the process at startup; the rest
/// abort only the requested operation.
#[derive(Debug, Error)]
pub enum HelperError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Test directory not found: {}", .0.display())]
    FixtureDirNotFound(PathBuf),

    #[error("Failed to parse config file {}: {source}", path.display())]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: String, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
