use crate::domain::{field::FieldBase, validation::ValidationResult};

/// Property names a set re-publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetProperty<'a> {
    /// A member field's value changed; carries the field name.
    Field(&'a str),
    /// The aggregate dirty flag may have changed.
    IsChanged,
    /// The aggregate error flag may have changed.
    HasError,
}

impl SetProperty<'_> {
    pub fn name(&self) -> &str {
        match self {
            Self::Field(name) => name,
            Self::IsChanged => "IsChanged",
            Self::HasError => "HasError",
        }
    }
}

/// Notifications published by a [`FieldSet`](super::FieldSet).
#[derive(Debug, Clone, Copy)]
pub enum SetEvent<'a> {
    PropertyChanged(SetProperty<'a>),
    /// A member field failed validation on its write path.
    FieldInvalidated {
        field: &'a dyn FieldBase,
        result: &'a ValidationResult,
    },
    /// A field passing the error filter went from valid to erroring.
    ///
    /// `message` is the error recorded at that transition; the field itself
    /// may have moved on by the time the event is delivered.
    ErrorRaised {
        field: &'a dyn FieldBase,
        message: &'a str,
    },
    /// A field passing the error filter went from erroring to valid.
    ErrorCleared(&'a dyn FieldBase),
}

/// The three configurable set filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Scopes the `is_changed` aggregate and its notifications.
    IsChanged,
    /// Scopes the `has_error` aggregate, its notifications and
    /// `ErrorRaised`/`ErrorCleared`.
    HasError,
    /// Scopes bulk `validation_check`.
    ValidationCheck,
}
