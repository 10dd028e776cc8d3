//! Unified error handling for formkit-core.
//!
//! Wraps field contract violations and application failures in one type so
//! callers can use `?` across both layers.

use thiserror::Error;

use crate::application::AppError;
use crate::domain::{ErrorCategory, FieldError};

/// Root error type for formkit-core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormkitError {
    /// Contract violations from fields and field sets.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Orchestration failures from the application layer.
    #[error(transparent)]
    Application(#[from] AppError),
}

impl FormkitError {
    /// User-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Field(FieldError::ReadOnly { name }) => {
                vec![format!("{name} is assigned by the system and cannot be edited")]
            }
            Self::Field(FieldError::NotFound { .. }) => {
                vec!["Check the field name; names are case-sensitive".into()]
            }
            Self::Field(_) => vec![
                "This is a wiring error in the calling code".into(),
                "Please report it with the command you ran".into(),
            ],
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Error category for display styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Field(e) => e.category(),
            Self::Application(e) => e.category(),
        }
    }
}

/// Convenient result type alias.
pub type FormkitResult<T> = Result<T, FormkitError>;
