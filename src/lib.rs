//! stratus - declarative serverless function resources
//!
//! Declare the functions a backend deploys, validate the declarations
//! at declaration time, and emit a deterministic deploy manifest for
//! external packaging/deployment tooling.

pub mod backend;
pub mod cli;
pub mod manifest;
pub mod observability;
pub mod project;
pub mod resource;
