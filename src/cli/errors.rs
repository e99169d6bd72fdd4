//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::fmt;
use std::io;

use crate::loader::LoadError;
use crate::spec::SpecError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (files, stdout)
    IoError,
    /// Input file does not exist
    FileNotFound,
    /// Custom schema could not be loaded
    SchemaError,
    /// One or more specifications failed validation
    ValidationFailed,
    /// Loading into the record store failed
    LoadFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "DOCTYPE_CLI_CONFIG_ERROR",
            Self::IoError => "DOCTYPE_CLI_IO_ERROR",
            Self::FileNotFound => "DOCTYPE_CLI_FILE_NOT_FOUND",
            Self::SchemaError => "DOCTYPE_CLI_SCHEMA_ERROR",
            Self::ValidationFailed => "DOCTYPE_CLI_VALIDATION_FAILED",
            Self::LoadFailed => "DOCTYPE_CLI_LOAD_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn file_not_found(path: &std::path::Path) -> Self {
        Self::new(
            CliErrorCode::FileNotFound,
            format!("File not found: {}", path.display()),
        )
    }

    pub fn schema_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::SchemaError, msg)
    }

    pub fn validation_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ValidationFailed, msg)
    }

    pub fn load_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::LoadFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<SpecError> for CliError {
    fn from(e: SpecError) -> Self {
        match e {
            SpecError::SchemaLoad { .. } => Self::schema_error(e.to_string()),
            SpecError::Io { .. } => Self::io_error(e.to_string()),
            SpecError::Yaml(_) => Self::validation_failed(e.to_string()),
        }
    }
}

impl From<LoadError> for CliError {
    fn from(e: LoadError) -> Self {
        Self::load_failed(format!("Error loading DocType: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
