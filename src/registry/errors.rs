//! Registry error types
//!
//! Every failing operation is detected before the registry is touched,
//! so an error never leaves a partial write behind.

use thiserror::Error;

use crate::model::ValidationError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("invalid medical data: {0}")]
    Validation(#[from] ValidationError),

    #[error("patient ID already exists: {0}")]
    DuplicateIdentifier(String),

    #[error("patient not found with ID: {0}")]
    NotFound(String),

    #[error("patient ID cannot be null or empty")]
    InvalidIdentifier,

    #[error("cannot calculate average: no patients in registry")]
    EmptyStore,

    #[error("invalid number for {field}: '{input}'")]
    MalformedNumericInput { field: &'static str, input: String },

    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },
}

impl RegistryError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::Validation(_) => "RQ_VALIDATION_FAILED",
            RegistryError::DuplicateIdentifier(_) => "RQ_DUPLICATE_IDENTIFIER",
            RegistryError::NotFound(_) => "RQ_NOT_FOUND",
            RegistryError::InvalidIdentifier => "RQ_INVALID_IDENTIFIER",
            RegistryError::EmptyStore => "RQ_EMPTY_STORE",
            RegistryError::MalformedNumericInput { .. } => "RQ_MALFORMED_NUMERIC_INPUT",
            RegistryError::Io { .. } => "RQ_REGISTRY_IO",
        }
    }

    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        RegistryError::Io {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}
