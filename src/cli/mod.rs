//! Command-line interface
//!
//! - validate: check one or more specifications
//! - load: validate and load a specification into a site's record store

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{load, run, run_command, validate, BatchSummary, LoadArgs};
pub use config::{validate_site, Config, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_banner, write_bullets, write_report, write_summary, RULE_WIDTH};
