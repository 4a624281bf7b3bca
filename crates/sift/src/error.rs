//! Error types for the sift crate.

use thiserror::Error;

use crate::value::FieldType;

/// Errors raised while sanitizing a predicate against a record schema.
///
/// Evaluation never fails; every error surfaces before the first record
/// is looked at.
#[derive(Debug, Error)]
pub enum SiftError {
    /// The predicate names a field the record does not expose.
    #[error("record has no field named '{field}'")]
    UnknownField { field: String },

    /// The operand cannot be compared against the field's declared type.
    #[error("expected field '{field}' to have type {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        actual: FieldType,
    },

    /// A LIKE predicate names a field that is not a `String`.
    #[error("LIKE needs a String field, but '{field}' has type {ty}")]
    NotAString { field: String, ty: FieldType },

    /// The LIKE escape character is one of the wildcards.
    #[error("escape character '{escape}' for field '{field}' is a LIKE wildcard")]
    InvalidEscape { field: String, escape: char },

    /// A LIKE pattern could not be compiled.
    #[error("invalid LIKE pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}

impl SiftError {
    /// Returns the field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            SiftError::UnknownField { field }
            | SiftError::TypeMismatch { field, .. }
            | SiftError::NotAString { field, .. }
            | SiftError::InvalidEscape { field, .. }
            | SiftError::InvalidPattern { field, .. } => field,
        }
    }
}

/// Result type for sift operations.
pub type Result<T> = std::result::Result<T, SiftError>;
