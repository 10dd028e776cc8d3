//! Notification payloads emitted by a [`Field`](super::Field).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationResult;

/// Which way a value is travelling through an IO filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Raw input on its way into the field (write path).
    Input,
    /// Stored value on its way out of the field (read path).
    Output,
}

/// Names carried by the generic property-changed notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    Value,
    IsChanged,
    ErrorMessage,
    HasError,
    IsReadOnly,
    AcceptInvalidValue,
    Description,
    Tag,
}

impl Property {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Value => "Value",
            Self::IsChanged => "IsChanged",
            Self::ErrorMessage => "ErrorMessage",
            Self::HasError => "HasError",
            Self::IsReadOnly => "IsReadOnly",
            Self::AcceptInvalidValue => "AcceptInvalidValue",
            Self::Description => "Description",
            Self::Tag => "Tag",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cancelable pre-commit notification.
///
/// Handlers run after validation; setting [`cancel`](Self::cancel) vetoes
/// the commit but does not undo the recorded validation state.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChanging<T> {
    new_value: T,
    old_value: T,
    cancel: bool,
}

impl<T> ValueChanging<T> {
    pub(crate) fn new(new_value: T, old_value: T) -> Self {
        Self {
            new_value,
            old_value,
            cancel: false,
        }
    }

    pub fn new_value(&self) -> &T {
        &self.new_value
    }

    pub fn old_value(&self) -> &T {
        &self.old_value
    }

    /// Veto the pending commit.
    pub fn cancel(&mut self) {
        self.cancel = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel
    }

    pub(crate) fn into_changed(self) -> ValueChanged<T> {
        ValueChanged {
            new_value: self.new_value,
            old_value: self.old_value,
        }
    }
}

/// Post-commit notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChanged<T> {
    new_value: T,
    old_value: T,
}

impl<T> ValueChanged<T> {
    pub fn new_value(&self) -> &T {
        &self.new_value
    }

    pub fn old_value(&self) -> &T {
        &self.old_value
    }
}

/// Outcome of a write-path validation together with the candidate value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationChecked<T> {
    result: ValidationResult,
    value: T,
}

impl<T> ValidationChecked<T> {
    pub(crate) fn new(result: ValidationResult, value: T) -> Self {
        Self { result, value }
    }

    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

/// Messages a field hands to the set that owns it.
///
/// Only produced while the field is attached to a
/// [`FieldSet`](crate::domain::FieldSet); the set drains them after every
/// mutable access.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSignal {
    /// Generic property-changed, other than `HasError`.
    Property(Property),
    /// `has_error` flipped: the new error message when raised, `None` when
    /// cleared.
    ErrorFlag(Option<String>),
    /// A write-path validation failed.
    Invalidated(ValidationResult),
}

type Handler<E> = Box<dyn FnMut(&E)>;

/// Subscriber lists for one field.
pub(crate) struct Handlers<T> {
    changing: Vec<Box<dyn FnMut(&mut ValueChanging<T>)>>,
    changed: Vec<Handler<ValueChanged<T>>>,
    checked: Vec<Handler<ValidationChecked<T>>>,
    invalidated: Vec<Handler<ValidationChecked<T>>>,
    property: Vec<Box<dyn FnMut(Property)>>,
}

impl<T> Default for Handlers<T> {
    fn default() -> Self {
        Self {
            changing: Vec::new(),
            changed: Vec::new(),
            checked: Vec::new(),
            invalidated: Vec::new(),
            property: Vec::new(),
        }
    }
}

impl<T> Handlers<T> {
    pub(crate) fn on_changing(&mut self, handler: impl FnMut(&mut ValueChanging<T>) + 'static) {
        self.changing.push(Box::new(handler));
    }

    pub(crate) fn on_changed(&mut self, handler: impl FnMut(&ValueChanged<T>) + 'static) {
        self.changed.push(Box::new(handler));
    }

    pub(crate) fn on_checked(&mut self, handler: impl FnMut(&ValidationChecked<T>) + 'static) {
        self.checked.push(Box::new(handler));
    }

    pub(crate) fn on_invalidated(
        &mut self,
        handler: impl FnMut(&ValidationChecked<T>) + 'static,
    ) {
        self.invalidated.push(Box::new(handler));
    }

    pub(crate) fn on_property(&mut self, handler: Box<dyn FnMut(Property)>) {
        self.property.push(handler);
    }

    pub(crate) fn emit_changing(&mut self, event: &mut ValueChanging<T>) {
        for handler in &mut self.changing {
            handler(event);
        }
    }

    pub(crate) fn emit_changed(&mut self, event: &ValueChanged<T>) {
        for handler in &mut self.changed {
            handler(event);
        }
    }

    pub(crate) fn emit_checked(&mut self, event: &ValidationChecked<T>) {
        for handler in &mut self.checked {
            handler(event);
        }
    }

    pub(crate) fn emit_invalidated(&mut self, event: &ValidationChecked<T>) {
        for handler in &mut self.invalidated {
            handler(event);
        }
    }

    pub(crate) fn emit_property(&mut self, property: Property) {
        for handler in &mut self.property {
            handler(property);
        }
    }
}
