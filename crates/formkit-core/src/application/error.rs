//! Application layer errors.
//!
//! These are orchestration failures. Field contract violations are
//! `FieldError` from `crate::domain`.

use thiserror::Error;

use crate::domain::ErrorCategory;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A command was invoked while its guard says no.
    #[error("Command '{name}' is not available right now")]
    CommandDisabled { name: String },

    /// User text could not be converted to the field's type.
    #[error("Invalid value for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// No record with this identifier.
    #[error("No record with id {id}")]
    RecordNotFound { id: u32 },

    /// One or more fields failed validation.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// A report renderer failed or its worker panicked.
    #[error("Report rendering failed: {reason}")]
    RenderingFailed { reason: String },
}

impl AppError {
    /// User-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::CommandDisabled { name } => vec![
                format!("'{name}' needs unsaved changes and no field errors"),
                "Fix the reported fields or change a value first".into(),
            ],
            Self::InvalidInput { field, .. } => vec![
                format!("Check the format expected by {field}"),
                "Dates use yyyy-mm-dd, prices are whole numbers".into(),
            ],
            Self::RecordNotFound { .. } => vec!["Try: formkit list to see available ids".into()],
            Self::ValidationFailed(_) => vec!["Correct the fields listed above".into()],
            Self::RenderingFailed { .. } => vec!["Check the error details above".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CommandDisabled { .. } | Self::InvalidInput { .. } | Self::ValidationFailed(_) => {
                ErrorCategory::Validation
            }
            Self::RecordNotFound { .. } => ErrorCategory::NotFound,
            Self::RenderingFailed { .. } => ErrorCategory::Internal,
        }
    }
}
