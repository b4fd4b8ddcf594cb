//! # Function Resource Descriptors
//!
//! A `FunctionResource` declares one deployable serverless function:
//! which source file implements it and which runtime the platform should
//! provision for it. Descriptors are validated when built and immutable
//! afterwards; packaging, deployment, and invocation belong to the
//! external platform that consumes the deploy manifest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

use super::errors::{ResourceError, ResourceResult};
use super::runtime::Runtime;

/// Per-function deployment settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSettings {
    /// Execution timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Memory limit in MB
    #[serde(default = "default_memory_mb")]
    pub memory_mb: u32,

    /// Environment variables handed to the deployed function
    #[serde(default)]
    pub env: HashMap<String, String>,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_memory_mb() -> u32 {
    128
}

impl Default for FunctionSettings {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            memory_mb: default_memory_mb(),
            env: HashMap::new(),
        }
    }
}

/// An immutable serverless function declaration
///
/// Built only through [`FunctionResourceBuilder`]; there is no `&mut`
/// surface, so the fields a consumer reads are the fields the builder
/// validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionResource {
    /// Unique resource ID
    id: Uuid,

    /// Function name (unique within a backend definition)
    name: String,

    /// Function description
    #[serde(default)]
    description: String,

    /// Source file implementing the function, relative to the project root
    entry: PathBuf,

    /// Runtime the platform should provision
    runtime: Runtime,

    /// Deployment settings
    #[serde(default)]
    settings: FunctionSettings,

    /// Declaration timestamp
    created_at: DateTime<Utc>,
}

impl FunctionResource {
    /// Start building a function resource with the given name.
    pub fn builder(name: impl Into<String>) -> FunctionResourceBuilder {
        FunctionResourceBuilder::new(name)
    }

    /// Unique resource ID.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Function description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Entry path exactly as declared.
    pub fn entry(&self) -> &Path {
        &self.entry
    }

    /// Declared runtime.
    pub fn runtime(&self) -> Runtime {
        self.runtime
    }

    /// Deployment settings.
    pub fn settings(&self) -> &FunctionSettings {
        &self.settings
    }

    /// Declaration timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Resolves the entry path against a concrete project root.
    ///
    /// Fails if the entry does not name an existing regular file. The
    /// declared path itself is never rewritten; only the returned
    /// resolved path is absolute.
    pub fn resolve_entry(&self, project_root: &Path) -> ResourceResult<PathBuf> {
        let resolved = project_root.join(&self.entry);
        if !resolved.is_file() {
            return Err(ResourceError::EntryNotFound {
                name: self.name.clone(),
                path: self.entry.display().to_string(),
            });
        }
        Ok(resolved)
    }
}

/// Builder performing declaration-time validation
#[derive(Debug, Clone)]
pub struct FunctionResourceBuilder {
    name: String,
    description: String,
    entry: Option<PathBuf>,
    runtime: Option<Runtime>,
    settings: FunctionSettings,
}

impl FunctionResourceBuilder {
    /// Create a builder for a function with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            entry: None,
            runtime: None,
            settings: FunctionSettings::default(),
        }
    }

    /// Set the entry path (relative to the project root).
    pub fn entry(mut self, entry: impl Into<PathBuf>) -> Self {
        self.entry = Some(entry.into());
        self
    }

    /// Set the runtime.
    pub fn runtime(mut self, runtime: Runtime) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replace the deployment settings wholesale.
    pub fn settings(mut self, settings: FunctionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the execution timeout in milliseconds.
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.settings.timeout_ms = timeout_ms;
        self
    }

    /// Set the memory limit in MB.
    pub fn memory_mb(mut self, memory_mb: u32) -> Self {
        self.settings.memory_mb = memory_mb;
        self
    }

    /// Add one environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.env.insert(key.into(), value.into());
        self
    }

    /// Validate the declaration and produce the immutable descriptor.
    pub fn build(self) -> ResourceResult<FunctionResource> {
        validate_name(&self.name)?;

        let entry = self
            .entry
            .ok_or_else(|| ResourceError::MissingEntry(self.name.clone()))?;
        validate_entry(&self.name, &entry)?;

        let runtime = self
            .runtime
            .ok_or_else(|| ResourceError::MissingRuntime(self.name.clone()))?;

        Ok(FunctionResource {
            id: Uuid::new_v4(),
            name: self.name,
            description: self.description,
            entry,
            runtime,
            settings: self.settings,
            created_at: Utc::now(),
        })
    }
}

/// Validates a function name: non-empty, ASCII alphanumeric plus `-`/`_`,
/// starting with an alphanumeric character.
fn validate_name(name: &str) -> ResourceResult<()> {
    if name.is_empty() {
        return Err(ResourceError::InvalidName("(empty)".to_string()));
    }

    if !name
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_alphanumeric())
    {
        return Err(ResourceError::InvalidName(name.to_string()));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ResourceError::InvalidName(name.to_string()));
    }

    Ok(())
}

/// Validates an entry path: non-empty, relative, and confined to the
/// project root (no `..` components).
fn validate_entry(name: &str, entry: &Path) -> ResourceResult<()> {
    if entry.as_os_str().is_empty() {
        return Err(ResourceError::MissingEntry(name.to_string()));
    }

    if entry.is_absolute() {
        return Err(ResourceError::InvalidEntry {
            name: name.to_string(),
            path: entry.display().to_string(),
            reason: "entry must be relative to the project root".to_string(),
        });
    }

    if entry
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(ResourceError::InvalidEntry {
            name: name.to_string(),
            path: entry.display().to_string(),
            reason: "entry must not escape the project root".to_string(),
        });
    }

    Ok(())
}
