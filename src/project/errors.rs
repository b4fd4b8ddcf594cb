//! # Project File Errors
//!
//! Loading a project file is all-or-nothing: a malformed file or an
//! invalid declaration fails the load with the offending function named.

use thiserror::Error;

use crate::backend::BackendError;
use crate::resource::ResourceError;

/// Result type for project operations
pub type ProjectResult<T> = Result<T, ProjectError>;

/// Project file errors
#[derive(Debug, Clone, Error)]
pub enum ProjectError {
    #[error("Project file not found: {0}")]
    FileNotFound(String),

    #[error("Malformed project file {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("Invalid declaration for function '{function}': {source}")]
    Declaration {
        function: String,
        source: ResourceError,
    },

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

impl ProjectError {
    /// Malformed project file error
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Invalid declaration error
    pub fn declaration(function: impl Into<String>, source: ResourceError) -> Self {
        Self::Declaration {
            function: function.into(),
            source,
        }
    }
}
