//! # Project File Structure
//!
//! A `stratus.json` file declares a project's function resources:
//!
//! ```json
//! {
//!   "name": "energiesnoeier",
//!   "manifest_path": "./manifest.json",
//!   "functions": [
//!     { "name": "excel", "entry": "./handler.py", "runtime": "python3.8" }
//!   ]
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::resource::{FunctionResource, FunctionSettings};

use super::errors::{ProjectError, ProjectResult};

/// One function declaration as written in the project file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDecl {
    /// Function name (unique)
    pub name: String,

    /// Entry path, relative to the project file's directory
    pub entry: String,

    /// Runtime tag (must be a supported platform tag)
    pub runtime: String,

    /// Function description
    #[serde(default)]
    pub description: String,

    /// Execution timeout in milliseconds (optional)
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Memory limit in MB (optional)
    #[serde(default)]
    pub memory_mb: Option<u32>,

    /// Environment variables
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl FunctionDecl {
    /// Builds a validated resource from this declaration.
    ///
    /// The runtime tag is parsed against the supported set here, so a
    /// typo or an unsupported tag fails the load rather than the
    /// deploy.
    pub fn to_resource(&self) -> ProjectResult<FunctionResource> {
        let runtime = self
            .runtime
            .parse()
            .map_err(|e| ProjectError::declaration(&self.name, e))?;

        let mut settings = FunctionSettings {
            env: self.env.clone(),
            ..FunctionSettings::default()
        };
        if let Some(timeout_ms) = self.timeout_ms {
            settings.timeout_ms = timeout_ms;
        }
        if let Some(memory_mb) = self.memory_mb {
            settings.memory_mb = memory_mb;
        }

        FunctionResource::builder(&self.name)
            .description(&self.description)
            .entry(&self.entry)
            .runtime(runtime)
            .settings(settings)
            .build()
            .map_err(|e| ProjectError::declaration(&self.name, e))
    }
}

/// Project file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required)
    pub name: String,

    /// Where `emit` writes the deploy manifest (optional)
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,

    /// Declared functions
    #[serde(default)]
    pub functions: Vec<FunctionDecl>,
}

fn default_manifest_path() -> String {
    "./manifest.json".to_string()
}

impl ProjectConfig {
    /// Validate the project file structure
    pub fn validate(&self, path: &str) -> ProjectResult<()> {
        if self.name.is_empty() {
            return Err(ProjectError::malformed(path, "project name is empty"));
        }
        if self.manifest_path.is_empty() {
            return Err(ProjectError::malformed(path, "manifest_path is empty"));
        }
        Ok(())
    }

    /// A starter project file for `stratus init`
    pub fn starter(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            manifest_path: default_manifest_path(),
            functions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Runtime;
    use std::path::Path;

    #[test]
    fn test_decl_to_resource() {
        let decl = FunctionDecl {
            name: "excel".to_string(),
            entry: "./handler.py".to_string(),
            runtime: "python3.8".to_string(),
            description: String::new(),
            timeout_ms: Some(30_000),
            memory_mb: None,
            env: HashMap::new(),
        };

        let resource = decl.to_resource().unwrap();
        assert_eq!(resource.name(), "excel");
        assert_eq!(resource.entry(), Path::new("./handler.py"));
        assert_eq!(resource.runtime(), Runtime::Python38);
        assert_eq!(resource.settings().timeout_ms, 30_000);
        assert_eq!(resource.settings().memory_mb, 128);
    }

    #[test]
    fn test_decl_bad_runtime_names_function() {
        let decl = FunctionDecl {
            name: "excel".to_string(),
            entry: "./handler.py".to_string(),
            runtime: "cobol85".to_string(),
            description: String::new(),
            timeout_ms: None,
            memory_mb: None,
            env: HashMap::new(),
        };

        let err = decl.to_resource().unwrap_err();
        assert!(matches!(err, ProjectError::Declaration { .. }));
        assert!(err.to_string().contains("excel"));
        assert!(err.to_string().contains("cobol85"));
    }

    #[test]
    fn test_config_defaults() {
        let config: ProjectConfig = serde_json::from_str(r#"{"name": "demo"}"#).unwrap();
        assert_eq!(config.manifest_path, "./manifest.json");
        assert!(config.functions.is_empty());
    }

    #[test]
    fn test_empty_name_invalid() {
        let config = ProjectConfig {
            name: String::new(),
            manifest_path: default_manifest_path(),
            functions: Vec::new(),
        };
        assert!(config.validate("./stratus.json").is_err());
    }
}
