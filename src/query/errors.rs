//! Query engine error types
//!
//! Error codes:
//! - RQ_UNGROUPABLE_RECORD
//! - RQ_UNKNOWN_FIELD
//! - RQ_NON_NUMERIC_FIELD
//! - RQ_INVALID_PREDICATE
//! - RQ_INVALID_SORT
//! - RQ_INVALID_AGGREGATE

use thiserror::Error;

/// Errors raised by the record query engine.
///
/// Empty input is never an error; see `Aggregate::Absent`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A partial group key function had no key for a record
    #[error("record at index {index} has no group key")]
    UngroupableRecord { index: usize },

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field '{field}' is {type_name}, not numeric")]
    NonNumericField {
        field: String,
        type_name: &'static str,
    },

    #[error("invalid predicate '{0}': expected field=value, field>value, field>=value, field<value or field<=value")]
    InvalidPredicate(String),

    #[error("invalid sort '{0}': expected field or field:asc|desc")]
    InvalidSort(String),

    #[error("invalid aggregate '{0}': expected sum|avg|min|max|count[:field]")]
    InvalidAggregate(String),
}

impl QueryError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::UngroupableRecord { .. } => "RQ_UNGROUPABLE_RECORD",
            QueryError::UnknownField(_) => "RQ_UNKNOWN_FIELD",
            QueryError::NonNumericField { .. } => "RQ_NON_NUMERIC_FIELD",
            QueryError::InvalidPredicate(_) => "RQ_INVALID_PREDICATE",
            QueryError::InvalidSort(_) => "RQ_INVALID_SORT",
            QueryError::InvalidAggregate(_) => "RQ_INVALID_AGGREGATE",
        }
    }
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
