//! # Resource Errors

use thiserror::Error;

/// Result type for resource operations
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Declaration-time resource errors
#[derive(Debug, Clone, Error)]
pub enum ResourceError {
    #[error("Invalid function name: {0}")]
    InvalidName(String),

    #[error("Function '{0}' declares no entry path")]
    MissingEntry(String),

    #[error("Function '{0}' declares no runtime")]
    MissingRuntime(String),

    #[error("Invalid entry path '{path}' for function '{name}': {reason}")]
    InvalidEntry {
        name: String,
        path: String,
        reason: String,
    },

    #[error("Entry file not found for function '{name}': {path}")]
    EntryNotFound { name: String, path: String },

    #[error("Unsupported runtime tag: {0}")]
    UnsupportedRuntime(String),
}
