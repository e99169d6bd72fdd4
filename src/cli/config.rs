//! Configuration file
//!
//! A JSON object; every key is optional:
//!
//! ```json
//! {
//!   "store_root": "./sites",
//!   "default_site": "development.localhost",
//!   "schema_path": "schemas/custom.json"
//! }
//! ```
//!
//! Command-line flags override these values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::observability::{Event, Logger};

/// Config path used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "./doctype-creator.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Root directory of the file record store
    #[serde(default = "default_store_root")]
    pub store_root: PathBuf,

    /// Site used when `--site` is not given
    #[serde(default = "default_site")]
    pub default_site: String,

    /// Custom structural schema used when `--schema` is not given
    #[serde(default)]
    pub schema_path: Option<PathBuf>,
}

fn default_store_root() -> PathBuf {
    PathBuf::from("./sites")
}

fn default_site() -> String {
    "development.localhost".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_root: default_store_root(),
            default_site: default_site(),
            schema_path: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        let source = path.display().to_string();
        Logger::event(Event::ConfigLoaded, &[("source", source.as_str())]);
        Ok(config)
    }

    /// Resolves the effective configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used if
    /// present, and built-in defaults otherwise.
    pub fn resolve(explicit: Option<&Path>) -> CliResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::load(path)
                } else {
                    Logger::event(Event::ConfigLoaded, &[("source", "defaults")]);
                    Ok(Self::default())
                }
            }
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.store_root.as_os_str().is_empty() {
            return Err(CliError::config_error("store_root must not be empty"));
        }

        validate_site(&self.default_site)?;

        Ok(())
    }
}

/// Site names become directory names under the store root.
pub fn validate_site(site: &str) -> CliResult<()> {
    if site.trim().is_empty() {
        return Err(CliError::config_error("site name must not be empty"));
    }
    if site.contains('/') || site.contains('\\') || site == "." || site == ".." {
        return Err(CliError::config_error(format!(
            "Invalid site name: '{}'",
            site
        )));
    }
    Ok(())
}
