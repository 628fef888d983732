//! CLI-specific error types
//!
//! CLI errors end the process with a non-zero exit. Registry and query
//! errors inside the interactive loop are reported and the loop goes on;
//! they only become a `CliError` when they escape a one-shot command.

use std::fmt;
use std::io;

use crate::query::QueryError;
use crate::registry::RegistryError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Registry operation failed
    RegistryError,
    /// Query could not be executed
    QueryError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "RQ_CLI_CONFIG_ERROR",
            Self::IoError => "RQ_CLI_IO_ERROR",
            Self::RegistryError => "RQ_CLI_REGISTRY_ERROR",
            Self::QueryError => "RQ_CLI_QUERY_ERROR",
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

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
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

impl From<RegistryError> for CliError {
    fn from(e: RegistryError) -> Self {
        Self::new(CliErrorCode::RegistryError, format!("{}: {}", e.code(), e))
    }
}

impl From<QueryError> for CliError {
    fn from(e: QueryError) -> Self {
        Self::new(CliErrorCode::QueryError, format!("{}: {}", e.code(), e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
