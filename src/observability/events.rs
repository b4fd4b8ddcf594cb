//! Lifecycle events
//!
//! The fixed vocabulary of events the declaration tooling emits.

/// Lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Project file parsed and declarations validated
    ProjectLoaded,
    /// One function resource registered
    FunctionDeclared,
    /// A declaration failed validation
    ValidationFailed,
    /// Deploy manifest written
    ManifestEmitted,
    /// Starter project file created
    ProjectInitialized,
}

impl Event {
    /// Returns the event name as logged
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ProjectLoaded => "PROJECT_LOADED",
            Event::FunctionDeclared => "FUNCTION_DECLARED",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::ManifestEmitted => "MANIFEST_EMITTED",
            Event::ProjectInitialized => "PROJECT_INITIALIZED",
        }
    }
}
