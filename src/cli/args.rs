//! CLI argument definitions using clap
//!
//! Commands:
//! - doctype-creator validate <FILES>... [--schema <path>]
//! - doctype-creator load <FILE> [--site <site>] [--overwrite] [--validate-only] [--no-validate]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Validate DocType YAML specifications and load them into a site's record store
#[derive(Parser, Debug)]
#[command(name = "doctype-creator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults to ./doctype-creator.json if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit structured logs at INFO level on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate one or more YAML specifications without loading them
    Validate {
        /// Path to YAML file(s)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Path to a custom JSON schema
        #[arg(long)]
        schema: Option<PathBuf>,
    },

    /// Validate a YAML specification and load it into the record store
    Load {
        /// Path to YAML specification file
        file: PathBuf,

        /// Site name (overrides default_site from the config)
        #[arg(long)]
        site: Option<String>,

        /// Delete and recreate an existing DocType
        #[arg(long)]
        overwrite: bool,

        /// Only validate, do not load
        #[arg(long, conflicts_with = "no_validate")]
        validate_only: bool,

        /// Skip validation (not recommended)
        #[arg(long)]
        no_validate: bool,

        /// Path to a custom JSON schema
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Record store root directory (overrides store_root from the config)
        #[arg(long)]
        store_root: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
