//! CLI argument definitions using clap
//!
//! Commands:
//! - stratus init --config <path>
//! - stratus check --config <path>
//! - stratus list --config <path>
//! - stratus emit --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stratus - declarative serverless function resources
#[derive(Parser, Debug)]
#[command(name = "stratus")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a starter project file
    Init {
        /// Path to project file
        #[arg(long, default_value = "./stratus.json")]
        config: PathBuf,
    },

    /// Validate every declaration, including entry file existence
    Check {
        /// Path to project file
        #[arg(long, default_value = "./stratus.json")]
        config: PathBuf,
    },

    /// Print the declared function resources
    List {
        /// Path to project file
        #[arg(long, default_value = "./stratus.json")]
        config: PathBuf,
    },

    /// Build the deploy manifest and write it to the configured path
    Emit {
        /// Path to project file
        #[arg(long, default_value = "./stratus.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
