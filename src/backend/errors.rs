//! # Backend Definition Errors

use thiserror::Error;

/// Result type for backend definition operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Backend definition errors
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("Function not declared: {0}")]
    NotFound(String),

    #[error("Function already declared: {0}")]
    AlreadyDeclared(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
