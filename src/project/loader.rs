//! # Project Loader
//!
//! Reads a project file from disk, validates every declaration, and
//! produces the registry the CLI commands operate on.

use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::ResourceRegistry;

use super::config::ProjectConfig;
use super::errors::{ProjectError, ProjectResult};

/// A successfully loaded project
#[derive(Debug)]
pub struct LoadedProject {
    /// The parsed project file
    pub config: ProjectConfig,

    /// Registry holding one validated resource per declaration
    pub registry: ResourceRegistry,

    /// Directory entry paths resolve against (the project file's directory)
    pub root: PathBuf,
}

/// Loads project files and builds registries from them
#[derive(Debug)]
pub struct ProjectLoader {
    config_path: PathBuf,
}

impl ProjectLoader {
    /// Creates a loader for the given project file path.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Returns the project file path.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads and validates the project file.
    ///
    /// Declarations are validated in file order; the first invalid one
    /// aborts the load. Entry files are not required to exist at load
    /// time (that check runs against the root in `check`/`emit`).
    pub fn load(&self) -> ProjectResult<LoadedProject> {
        let path_display = self.config_path.display().to_string();

        if !self.config_path.is_file() {
            return Err(ProjectError::FileNotFound(path_display));
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| ProjectError::malformed(&path_display, format!("read failed: {}", e)))?;

        let config: ProjectConfig = serde_json::from_str(&content)
            .map_err(|e| ProjectError::malformed(&path_display, format!("invalid JSON: {}", e)))?;

        config.validate(&path_display)?;

        let registry = ResourceRegistry::new();
        for decl in &config.functions {
            let resource = decl.to_resource()?;
            registry.register(resource)?;
        }

        let root = self
            .config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        Ok(LoadedProject {
            config,
            registry,
            root,
        })
    }
}
