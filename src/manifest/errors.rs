//! # Manifest Errors

use thiserror::Error;

use crate::resource::ResourceError;

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Deploy manifest errors
#[derive(Debug, Clone, Error)]
pub enum ManifestError {
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Manifest serialization error: {0}")]
    Serialization(String),

    #[error("Manifest I/O error: {0}")]
    Io(String),

    #[error("Unsupported manifest format version: {0}")]
    UnsupportedVersion(u8),
}
