//! # Resource Registry
//!
//! The set of function resources a backend definition declares. The
//! registry only collects and indexes descriptors; everything that
//! happens to them afterwards (packaging, deployment) is driven by the
//! external tooling that reads the deploy manifest.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::resource::{FunctionResource, Runtime};

use super::errors::{BackendError, BackendResult};

/// Registry of declared function resources
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    /// Resources by ID
    by_id: RwLock<HashMap<String, FunctionResource>>,

    /// Resource IDs by name
    by_name: RwLock<HashMap<String, String>>,

    /// Resource IDs by runtime tag
    by_runtime: RwLock<HashMap<String, Vec<String>>>,
}

impl ResourceRegistry {
    /// Create a new, empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function resource
    ///
    /// Names are unique within a backend definition; registering a
    /// second resource under an existing name fails and leaves the
    /// first untouched.
    pub fn register(&self, resource: FunctionResource) -> BackendResult<()> {
        let id = resource.id().to_string();
        let name = resource.name().to_string();
        let runtime_tag = resource.runtime().as_str().to_string();

        // Uniqueness check and name reservation happen under one write lock
        {
            let mut by_name = self
                .by_name
                .write()
                .map_err(|_| BackendError::Internal("Lock poisoned".into()))?;
            if by_name.contains_key(&name) {
                return Err(BackendError::AlreadyDeclared(name));
            }
            by_name.insert(name, id.clone());
        }

        {
            let mut by_id = self
                .by_id
                .write()
                .map_err(|_| BackendError::Internal("Lock poisoned".into()))?;
            by_id.insert(id.clone(), resource);
        }

        {
            let mut by_runtime = self
                .by_runtime
                .write()
                .map_err(|_| BackendError::Internal("Lock poisoned".into()))?;
            by_runtime.entry(runtime_tag).or_default().push(id);
        }

        Ok(())
    }

    /// Get a resource by name
    pub fn get(&self, name: &str) -> BackendResult<FunctionResource> {
        let id = {
            let by_name = self
                .by_name
                .read()
                .map_err(|_| BackendError::Internal("Lock poisoned".into()))?;
            by_name
                .get(name)
                .cloned()
                .ok_or_else(|| BackendError::NotFound(name.to_string()))?
        };

        let by_id = self
            .by_id
            .read()
            .map_err(|_| BackendError::Internal("Lock poisoned".into()))?;
        by_id
            .get(&id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(name.to_string()))
    }

    /// Get all resources declared under a runtime
    pub fn get_by_runtime(&self, runtime: Runtime) -> Vec<FunctionResource> {
        let ids: Vec<String> = {
            if let Ok(by_runtime) = self.by_runtime.read() {
                by_runtime
                    .get(runtime.as_str())
                    .cloned()
                    .unwrap_or_default()
            } else {
                return Vec::new();
            }
        };

        let mut resources = Vec::new();
        if let Ok(by_id) = self.by_id.read() {
            for id in ids {
                if let Some(resource) = by_id.get(&id) {
                    resources.push(resource.clone());
                }
            }
        }

        resources
    }

    /// Remove a declaration by name
    pub fn unregister(&self, name: &str) -> BackendResult<()> {
        let resource = self.get(name)?;
        let id = resource.id().to_string();
        let runtime_tag = resource.runtime().as_str();

        {
            let mut by_id = self
                .by_id
                .write()
                .map_err(|_| BackendError::Internal("Lock poisoned".into()))?;
            by_id.remove(&id);
        }

        {
            let mut by_name = self
                .by_name
                .write()
                .map_err(|_| BackendError::Internal("Lock poisoned".into()))?;
            by_name.remove(name);
        }

        {
            let mut by_runtime = self
                .by_runtime
                .write()
                .map_err(|_| BackendError::Internal("Lock poisoned".into()))?;
            if let Some(ids) = by_runtime.get_mut(runtime_tag) {
                ids.retain(|i| i != &id);
            }
        }

        Ok(())
    }

    /// List all declared resources, sorted by name
    ///
    /// Sorted output keeps everything derived from the registry
    /// (manifests, CLI listings) deterministic.
    pub fn list(&self) -> Vec<FunctionResource> {
        let mut resources: Vec<FunctionResource> = self
            .by_id
            .read()
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default();
        resources.sort_by(|a, b| a.name().cmp(b.name()));
        resources
    }

    /// Number of declared resources
    pub fn len(&self) -> usize {
        self.by_id.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Check if no resources are declared
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
