// ============================================================================
// domain/error.rs - CONTRACT VIOLATIONS
// ============================================================================

use thiserror::Error;

/// Wiring errors raised by fields and field sets.
///
/// These signal a defect in the calling code, never bad user input.
/// Validation failures are reported through
/// [`ValidationResult`](crate::domain::ValidationResult) and the field's
/// error state instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A write was attempted on a read-only field.
    #[error("field '{name}' is read-only")]
    ReadOnly { name: String },

    /// No field with this name exists in the set.
    #[error("no field named '{name}'")]
    NotFound { name: String },

    /// Index lookup past the end of the set.
    #[error("field index {index} out of range (set holds {len} fields)")]
    OutOfRange { index: usize, len: usize },

    /// A [`FieldKey`](crate::domain::FieldKey) was used on a set that did
    /// not issue it.
    #[error("field key #{index} belongs to another field set")]
    ForeignKey { index: usize },

    /// The opaque value or typed lookup did not match the field's value type.
    #[error("field '{name}' holds {actual}, not {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    /// Error category for display styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } | Self::OutOfRange { .. } => ErrorCategory::NotFound,
            Self::ReadOnly { .. } | Self::ForeignKey { .. } | Self::TypeMismatch { .. } => {
                ErrorCategory::Contract
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Input rejected by a validator.
    Validation,
    /// A named or indexed item does not exist.
    NotFound,
    /// The caller broke the API contract (read-only write, wrong type).
    Contract,
    Internal,
}
