//! CLI-specific error types

use std::fmt;
use std::io;

use crate::manifest::ManifestError;
use crate::project::ProjectError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Project file error
    ConfigError,
    /// I/O error
    IoError,
    /// Project file already exists
    AlreadyInitialized,
    /// One or more declarations failed validation
    ValidationFailed,
    /// Manifest build or write failed
    ManifestError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "STRATUS_CLI_CONFIG_ERROR",
            Self::IoError => "STRATUS_CLI_IO_ERROR",
            Self::AlreadyInitialized => "STRATUS_CLI_ALREADY_INITIALIZED",
            Self::ValidationFailed => "STRATUS_CLI_VALIDATION_FAILED",
            Self::ManifestError => "STRATUS_CLI_MANIFEST_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Project file error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Project file already exists
    pub fn already_initialized(path: impl Into<String>) -> Self {
        Self::new(
            CliErrorCode::AlreadyInitialized,
            format!("Project file already exists: {}", path.into()),
        )
    }

    /// Validation failure
    pub fn validation_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ValidationFailed, msg)
    }

    /// Manifest failure
    pub fn manifest_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ManifestError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ProjectError> for CliError {
    fn from(e: ProjectError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<ManifestError> for CliError {
    fn from(e: ManifestError) -> Self {
        Self::manifest_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
