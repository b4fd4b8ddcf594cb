//! CLI command implementations
//!
//! Every command loads the project file, operates on the resulting
//! registry, and writes one JSON envelope to stdout. Nothing here
//! packages or deploys anything; `emit` ends at the manifest file the
//! external tooling picks up.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde_json::json;

use crate::manifest::DeployManifest;
use crate::observability::{log_event, Event};
use crate::project::{LoadedProject, ProjectConfig, ProjectLoader};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Parse arguments and dispatch
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(&config),
        Command::Check { config } => check(&config),
        Command::List { config } => list(&config),
        Command::Emit { config } => emit(&config),
    }
}

/// Create a starter project file
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(
            config_path.display().to_string(),
        ));
    }

    let name = config_path
        .parent()
        .and_then(|p| p.canonicalize().ok())
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "backend".to_string());

    let starter = ProjectConfig::starter(name);
    let mut content = serde_json::to_string_pretty(&starter)?;
    content.push('\n');
    fs::write(config_path, content)?;

    let path_str = config_path.display().to_string();
    log_event(Event::ProjectInitialized, &[("path", path_str.as_str())]);

    write_response(json!({ "created": path_str }))
}

/// Validate every declaration, including entry file existence
pub fn check(config_path: &Path) -> CliResult<()> {
    let loaded = load_project(config_path)?;

    let mut checked = Vec::new();
    let mut failures = Vec::new();
    for resource in loaded.registry.list() {
        match resource.resolve_entry(&loaded.root) {
            Ok(_) => checked.push(json!({
                "name": resource.name(),
                "entry": resource.entry().display().to_string(),
                "runtime": resource.runtime().as_str(),
                "status": "ok"
            })),
            Err(e) => {
                log_event(Event::ValidationFailed, &[("name", resource.name())]);
                failures.push(e.to_string());
            }
        }
    }

    if !failures.is_empty() {
        let message = failures.join("; ");
        write_error("STRATUS_CLI_VALIDATION_FAILED", &message)?;
        return Err(CliError::validation_failed(message));
    }

    write_response(json!({
        "project": loaded.config.name,
        "functions": checked
    }))
}

/// Print the declared function resources
pub fn list(config_path: &Path) -> CliResult<()> {
    let loaded = load_project(config_path)?;

    let functions: Vec<_> = loaded
        .registry
        .list()
        .iter()
        .map(|r| {
            json!({
                "name": r.name(),
                "entry": r.entry().display().to_string(),
                "runtime": r.runtime().as_str(),
                "timeout_ms": r.settings().timeout_ms,
                "memory_mb": r.settings().memory_mb
            })
        })
        .collect();

    write_response(json!({
        "project": loaded.config.name,
        "functions": functions
    }))
}

/// Build the deploy manifest and write it to the configured path
pub fn emit(config_path: &Path) -> CliResult<()> {
    let loaded = load_project(config_path)?;

    let manifest = DeployManifest::from_registry(
        &loaded.config.name,
        &loaded.registry,
        &loaded.root,
        Utc::now(),
    )?;

    let output_path = loaded.root.join(&loaded.config.manifest_path);
    manifest.write_to_file(&output_path)?;

    let path_str = output_path.display().to_string();
    let count = manifest.functions.len().to_string();
    log_event(
        Event::ManifestEmitted,
        &[("path", path_str.as_str()), ("functions", count.as_str())],
    );

    write_response(json!({
        "manifest": path_str,
        "functions": manifest.functions.len()
    }))
}

fn load_project(config_path: &Path) -> CliResult<LoadedProject> {
    let loaded = ProjectLoader::new(config_path).load()?;

    let count = loaded.registry.len().to_string();
    log_event(
        Event::ProjectLoaded,
        &[
            ("project", loaded.config.name.as_str()),
            ("functions", count.as_str()),
        ],
    );
    for resource in loaded.registry.list() {
        log_event(
            Event::FunctionDeclared,
            &[
                ("name", resource.name()),
                ("runtime", resource.runtime().as_str()),
            ],
        );
    }

    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_init_creates_project_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stratus.json");

        init(&path).unwrap();

        let config: ProjectConfig =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(!config.name.is_empty());
        assert!(config.functions.is_empty());
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "stratus.json", "{}");

        let err = init(&path).unwrap_err();
        assert_eq!(err.code_str(), "STRATUS_CLI_ALREADY_INITIALIZED");
    }

    #[test]
    fn test_check_passes_with_existing_entry() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "handler.py", "def handler(): pass\n");
        let config = write_file(
            &dir,
            "stratus.json",
            r#"{
                "name": "demo",
                "functions": [
                    { "name": "excel", "entry": "./handler.py", "runtime": "python3.8" }
                ]
            }"#,
        );

        check(&config).unwrap();
    }

    #[test]
    fn test_check_fails_on_missing_entry() {
        let dir = TempDir::new().unwrap();
        let config = write_file(
            &dir,
            "stratus.json",
            r#"{
                "name": "demo",
                "functions": [
                    { "name": "excel", "entry": "./handler.py", "runtime": "python3.8" }
                ]
            }"#,
        );

        let err = check(&config).unwrap_err();
        assert_eq!(err.code_str(), "STRATUS_CLI_VALIDATION_FAILED");
        assert!(err.message().contains("excel"));
        assert!(err.message().contains("./handler.py"));
    }

    #[test]
    fn test_emit_writes_manifest() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "handler.py", "def handler(): pass\n");
        let config = write_file(
            &dir,
            "stratus.json",
            r#"{
                "name": "demo",
                "functions": [
                    { "name": "excel", "entry": "./handler.py", "runtime": "python3.8" }
                ]
            }"#,
        );

        emit(&config).unwrap();

        let manifest = DeployManifest::read_from_file(&dir.path().join("manifest.json")).unwrap();
        assert_eq!(manifest.project, "demo");
        assert_eq!(manifest.functions.len(), 1);
        assert_eq!(manifest.functions[0].runtime.as_str(), "python3.8");
    }

    #[test]
    fn test_emit_fails_on_missing_entry() {
        let dir = TempDir::new().unwrap();
        let config = write_file(
            &dir,
            "stratus.json",
            r#"{
                "name": "demo",
                "functions": [
                    { "name": "excel", "entry": "./handler.py", "runtime": "python3.8" }
                ]
            }"#,
        );

        let err = emit(&config).unwrap_err();
        assert_eq!(err.code_str(), "STRATUS_CLI_MANIFEST_ERROR");
    }
}
