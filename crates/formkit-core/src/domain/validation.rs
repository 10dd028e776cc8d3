//! Validation outcomes.
//!
//! A [`ValidationResult`] is ordinary data: a failed validation is the
//! expected result of bad user input and is never surfaced as an `Err`.
//! Contract violations live in [`crate::domain::FieldError`] instead.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of running a validator against a candidate value.
///
/// A successful result never carries a message; that invariant is enforced
/// by the shape of the enum rather than checked at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "message", rename_all = "snake_case")]
pub enum ValidationResult {
    #[default]
    Success,
    Fail(String),
}

impl ValidationResult {
    /// The shared success value.
    pub const fn success() -> Self {
        Self::Success
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail(message.into())
    }

    /// `success()` when `ok`, otherwise `fail(message)`.
    pub fn from_bool(ok: bool, message: impl Into<String>) -> Self {
        if ok {
            Self::Success
        } else {
            Self::fail(message)
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub const fn is_failed(&self) -> bool {
        !self.is_success()
    }

    /// The failure message, `None` on success.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Fail(message) => Some(message),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("ok"),
            Self::Fail(message) => write!(f, "failed: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_has_no_message() {
        let ok = ValidationResult::success();
        assert!(ok.is_success());
        assert!(!ok.is_failed());
        assert_eq!(ok.message(), None);
        assert_eq!(ok, ValidationResult::default());
    }

    #[test]
    fn fail_keeps_message() {
        let failed = ValidationResult::fail("price must not be negative");
        assert!(failed.is_failed());
        assert_eq!(failed.message(), Some("price must not be negative"));
        assert_eq!(failed.to_string(), "failed: price must not be negative");
    }

    #[test]
    fn from_bool_drops_message_on_success() {
        assert_eq!(
            ValidationResult::from_bool(true, "unused"),
            ValidationResult::Success
        );
        assert_eq!(
            ValidationResult::from_bool(false, "title is required"),
            ValidationResult::fail("title is required")
        );
    }

    #[test]
    fn serializes_with_outcome_tag() {
        let json = serde_json::to_string(&ValidationResult::fail("bad")).unwrap();
        assert_eq!(json, r#"{"outcome":"fail","message":"bad"}"#);

        let json = serde_json::to_string(&ValidationResult::success()).unwrap();
        assert_eq!(json, r#"{"outcome":"success"}"#);
    }
}
