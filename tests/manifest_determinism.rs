//! Manifest Determinism Tests
//!
//! - Emitting twice over an unchanged project yields identical bytes
//! - Registration order never leaks into the manifest
//! - Checksums track entry file contents and nothing else
//! - A missing entry file fails the build, naming the function

use std::fs;

use chrono::{DateTime, TimeZone, Utc};
use stratus::backend::ResourceRegistry;
use stratus::manifest::{DeployManifest, ManifestError};
use stratus::resource::{FunctionResource, Runtime};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 7, 11, 30, 0).unwrap()
}

fn resource(name: &str, entry: &str, runtime: Runtime) -> FunctionResource {
    FunctionResource::builder(name)
        .entry(entry)
        .runtime(runtime)
        .build()
        .unwrap()
}

fn project_dir(handlers: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (file, body) in handlers {
        fs::write(dir.path().join(file), body).unwrap();
    }
    dir
}

// =============================================================================
// Byte-Determinism Tests
// =============================================================================

/// Same registry, same tree, same timestamp: identical bytes.
#[test]
fn test_emission_is_byte_deterministic() {
    let dir = project_dir(&[("handler.py", "def handler(): pass\n")]);

    let registry = ResourceRegistry::new();
    registry
        .register(resource("excel", "./handler.py", Runtime::Python38))
        .unwrap();

    let first = DeployManifest::from_registry("demo", &registry, dir.path(), fixed_time())
        .unwrap()
        .to_json()
        .unwrap();
    let second = DeployManifest::from_registry("demo", &registry, dir.path(), fixed_time())
        .unwrap()
        .to_json()
        .unwrap();

    assert_eq!(first, second);
}

/// Registration order never leaks into the manifest.
#[test]
fn test_registration_order_does_not_leak() {
    let dir = project_dir(&[
        ("a.py", "def handler(): pass\n"),
        ("b.py", "def handler(): pass\n"),
    ]);

    let forward = ResourceRegistry::new();
    forward
        .register(resource("alpha", "./a.py", Runtime::Python38))
        .unwrap();
    forward
        .register(resource("beta", "./b.py", Runtime::Node20))
        .unwrap();

    let reversed = ResourceRegistry::new();
    reversed
        .register(resource("beta", "./b.py", Runtime::Node20))
        .unwrap();
    reversed
        .register(resource("alpha", "./a.py", Runtime::Python38))
        .unwrap();

    let from_forward = DeployManifest::from_registry("demo", &forward, dir.path(), fixed_time())
        .unwrap()
        .to_json()
        .unwrap();
    let from_reversed = DeployManifest::from_registry("demo", &reversed, dir.path(), fixed_time())
        .unwrap()
        .to_json()
        .unwrap();

    assert_eq!(from_forward, from_reversed);
}

// =============================================================================
// Checksum Tests
// =============================================================================

/// Changing one entry file changes only that entry's checksum.
#[test]
fn test_checksum_isolates_changed_entry() {
    let dir = project_dir(&[
        ("a.py", "def handler(): pass\n"),
        ("b.py", "def handler(): pass\n"),
    ]);

    let registry = ResourceRegistry::new();
    registry
        .register(resource("alpha", "./a.py", Runtime::Python38))
        .unwrap();
    registry
        .register(resource("beta", "./b.py", Runtime::Python38))
        .unwrap();

    let before = DeployManifest::from_registry("demo", &registry, dir.path(), fixed_time()).unwrap();
    fs::write(dir.path().join("a.py"), "def handler(): return 1\n").unwrap();
    let after = DeployManifest::from_registry("demo", &registry, dir.path(), fixed_time()).unwrap();

    assert_ne!(before.functions[0].checksum, after.functions[0].checksum);
    assert_eq!(before.functions[1].checksum, after.functions[1].checksum);
}

/// Identical file contents hash identically across functions.
#[test]
fn test_identical_contents_identical_checksums() {
    let dir = project_dir(&[
        ("a.py", "def handler(): pass\n"),
        ("b.py", "def handler(): pass\n"),
    ]);

    let registry = ResourceRegistry::new();
    registry
        .register(resource("alpha", "./a.py", Runtime::Python38))
        .unwrap();
    registry
        .register(resource("beta", "./b.py", Runtime::Python38))
        .unwrap();

    let manifest =
        DeployManifest::from_registry("demo", &registry, dir.path(), fixed_time()).unwrap();
    assert_eq!(manifest.functions[0].checksum, manifest.functions[1].checksum);
}

// =============================================================================
// Failure Tests
// =============================================================================

/// A missing entry fails the whole build and names the function.
#[test]
fn test_missing_entry_fails_build() {
    let dir = project_dir(&[("a.py", "def handler(): pass\n")]);

    let registry = ResourceRegistry::new();
    registry
        .register(resource("alpha", "./a.py", Runtime::Python38))
        .unwrap();
    registry
        .register(resource("ghost", "./ghost.py", Runtime::Python38))
        .unwrap();

    let err =
        DeployManifest::from_registry("demo", &registry, dir.path(), fixed_time()).unwrap_err();
    assert!(matches!(err, ManifestError::Resource(_)));
    assert!(err.to_string().contains("ghost"));
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

/// A written manifest reads back equal, through the file system.
#[test]
fn test_file_round_trip() {
    let dir = project_dir(&[("handler.py", "def handler(): pass\n")]);

    let registry = ResourceRegistry::new();
    registry
        .register(resource("excel", "./handler.py", Runtime::Python38))
        .unwrap();

    let manifest =
        DeployManifest::from_registry("demo", &registry, dir.path(), fixed_time()).unwrap();
    let path = dir.path().join("manifest.json");
    manifest.write_to_file(&path).unwrap();

    let read_back = DeployManifest::read_from_file(&path).unwrap();
    assert_eq!(read_back, manifest);
    assert_eq!(read_back.functions[0].entry, "./handler.py");
    assert_eq!(read_back.functions[0].runtime.as_str(), "python3.8");
}
