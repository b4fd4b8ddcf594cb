//! # Deploy Manifest
//!
//! The manifest is the authoritative hand-off document between a
//! backend definition and the external packaging/deployment tooling.
//!
//! Format:
//! ```json
//! {
//!   "format_version": 1,
//!   "project": "energiesnoeier",
//!   "generated_at": "2026-08-07T11:30:00Z",
//!   "functions": [
//!     {
//!       "name": "excel",
//!       "entry": "./handler.py",
//!       "runtime": "python3.8",
//!       "checksum": "sha256:4f8b...",
//!       "timeout_ms": 10000,
//!       "memory_mb": 128,
//!       "env": {}
//!     }
//!   ]
//! }
//! ```
//!
//! Entries are name-sorted and environment maps are ordered, so
//! emitting twice over an unchanged project yields identical bytes.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::backend::ResourceRegistry;
use crate::resource::{FunctionResource, Runtime};

use super::errors::{ManifestError, ManifestResult};

/// Current manifest format version
pub const MANIFEST_FORMAT_VERSION: u8 = 1;

/// One deployable function in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Function name
    pub name: String,

    /// Entry path exactly as declared
    pub entry: String,

    /// Runtime tag the platform should provision
    pub runtime: Runtime,

    /// SHA-256 of the entry file contents (format: "sha256:<hex>")
    pub checksum: String,

    /// Execution timeout in milliseconds
    pub timeout_ms: u64,

    /// Memory limit in MB
    pub memory_mb: u32,

    /// Environment variables, key-ordered
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl ManifestEntry {
    /// Builds an entry from a declared resource, checksumming its entry
    /// file under the given project root.
    pub fn from_resource(resource: &FunctionResource, project_root: &Path) -> ManifestResult<Self> {
        let resolved = resource.resolve_entry(project_root)?;
        let bytes = fs::read(&resolved).map_err(|e| {
            ManifestError::Io(format!(
                "Failed to read entry file {}: {}",
                resolved.display(),
                e
            ))
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let checksum = format!("sha256:{:x}", hasher.finalize());

        Ok(Self {
            name: resource.name().to_string(),
            entry: resource.entry().display().to_string(),
            runtime: resource.runtime(),
            checksum,
            timeout_ms: resource.settings().timeout_ms,
            memory_mb: resource.settings().memory_mb,
            env: resource
                .settings()
                .env
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        })
    }
}

/// The deploy manifest consumed by external tooling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployManifest {
    /// Manifest format version
    pub format_version: u8,

    /// Project name
    pub project: String,

    /// Generation timestamp (RFC3339, UTC)
    pub generated_at: String,

    /// Deployable functions, name-sorted
    pub functions: Vec<ManifestEntry>,
}

impl DeployManifest {
    /// Builds a manifest from a registry of declared resources.
    ///
    /// Every entry file is resolved and checksummed against
    /// `project_root`; a missing or unreadable entry fails the whole
    /// build. The timestamp is taken as an argument so callers control
    /// it (the CLI passes the clock, tests pin it).
    pub fn from_registry(
        project: impl Into<String>,
        registry: &ResourceRegistry,
        project_root: &Path,
        generated_at: DateTime<Utc>,
    ) -> ManifestResult<Self> {
        let mut functions = Vec::with_capacity(registry.len());
        for resource in registry.list() {
            functions.push(ManifestEntry::from_resource(&resource, project_root)?);
        }

        Ok(Self {
            format_version: MANIFEST_FORMAT_VERSION,
            project: project.into(),
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            functions,
        })
    }

    /// Serializes the manifest to pretty-printed JSON.
    pub fn to_json(&self) -> ManifestResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ManifestError::Serialization(format!("Failed to serialize: {}", e)))
    }

    /// Parses a manifest from JSON, rejecting unknown format versions.
    pub fn from_json(json: &str) -> ManifestResult<Self> {
        let manifest: Self = serde_json::from_str(json)
            .map_err(|e| ManifestError::Serialization(format!("Failed to parse: {}", e)))?;

        if manifest.format_version != MANIFEST_FORMAT_VERSION {
            return Err(ManifestError::UnsupportedVersion(manifest.format_version));
        }

        Ok(manifest)
    }

    /// Writes the manifest to a file, fsynced.
    pub fn write_to_file(&self, path: &Path) -> ManifestResult<()> {
        let json = self.to_json()?;

        let mut file = File::create(path).map_err(|e| {
            ManifestError::Io(format!("Failed to create {}: {}", path.display(), e))
        })?;

        file.write_all(json.as_bytes())
            .map_err(|e| ManifestError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

        file.sync_all()
            .map_err(|e| ManifestError::Io(format!("Failed to fsync {}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Reads a manifest back from a file.
    pub fn read_from_file(path: &Path) -> ManifestResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ManifestError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        Self::from_json(&content)
    }
}
