//! Field validation errors
//!
//! A validation error names the offending field and why its value was
//! rejected. It is returned as data from constructors; nothing is built
//! when one is produced.

use std::fmt;

use thiserror::Error;

/// A single field that failed its domain check
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    /// Field name as exposed by `Record::field`
    pub field: &'static str,
    /// Human-readable reason
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    /// Field was empty or whitespace only
    pub fn blank(field: &'static str) -> Self {
        Self::new(field, "cannot be empty")
    }

    /// Value fell outside an inclusive range
    pub fn out_of_range<T: fmt::Display>(field: &'static str, actual: T, min: T, max: T) -> Self {
        Self::new(field, format!("{} is outside [{}, {}]", actual, min, max))
    }

    /// Value is not one of the allowed members
    pub fn not_member(field: &'static str, actual: &str, allowed: &[&str]) -> Self {
        Self::new(
            field,
            format!("'{}' is not one of {}", actual, allowed.join(", ")),
        )
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        "RQ_VALIDATION_FAILED"
    }
}

/// Result type for validating constructors
pub type ValidationResult<T> = Result<T, ValidationError>;
