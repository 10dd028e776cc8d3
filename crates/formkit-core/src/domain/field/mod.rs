//! The typed [`Field`] and its value mutation protocol.
//!
//! A field owns one named value slot. Every write runs through the same
//! pipeline:
//!
//! ```text
//!  raw ─► read-only? ─► io_filter(Input) ─► equal to value()? ─► validator
//!                                                                   │
//!        ValidationChecked / Invalidated ◄── record error ◄─────────┘
//!                   │
//!                   ▼  (valid, or invalid values accepted)
//!        ValueChanging (cancelable) ─► commit ─► IsChanged ─► ValueChanged ─► "Value"
//! ```
//!
//! `init`, `reset` and `clean` bypass the pipeline and return the field to
//! the clean, valid state.

pub mod base;
pub mod events;

use std::any::Any;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

pub use base::{FieldBase, Payload};
pub use events::{
    Direction, FieldSignal, Property, ValidationChecked, ValueChanged, ValueChanging,
};

use crate::domain::{error::FieldError, validation::ValidationResult};
use events::Handlers;

/// Bounds every field value satisfies.
///
/// `Send + Sync` lets values leave the interactive thread inside a
/// [`Snapshot`](crate::domain::Snapshot).
pub trait FieldValue: Clone + fmt::Debug + Send + Sync + 'static {}

impl<T> FieldValue for T where T: Clone + fmt::Debug + Send + Sync + 'static {}

pub type Validator<T> = Rc<dyn Fn(&T) -> ValidationResult>;
pub type IoFilter<T> = Rc<dyn Fn(T, Direction) -> T>;
pub type Equality<T> = Rc<dyn Fn(&T, &T) -> bool>;
pub type Tag = Arc<dyn Any + Send + Sync>;

/// What a call to [`Field::set_value`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteOutcome {
    /// Candidate equalled the current value; nothing ran.
    Unchanged,
    /// Value stored.
    Committed,
    /// Validation failed and invalid values are not accepted.
    Rejected,
    /// A `ValueChanging` handler vetoed the commit.
    Cancelled,
}

impl WriteOutcome {
    pub const fn is_committed(self) -> bool {
        matches!(self, Self::Committed)
    }
}

/// A named, typed, validated value slot with dirty/error tracking.
pub struct Field<T: FieldValue> {
    name: String,
    current: T,
    baseline: T,
    accept_invalid_value: bool,
    read_only: bool,
    validator: Option<Validator<T>>,
    io_filter: Option<IoFilter<T>>,
    equality: Equality<T>,
    error_message: Option<String>,
    is_changed: bool,
    tag: Option<Tag>,
    description: Option<String>,
    handlers: Handlers<T>,
    outbox: Option<Vec<FieldSignal>>,
}

impl<T: FieldValue + PartialEq> Field<T> {
    /// Create a field compared with `PartialEq`.
    ///
    /// Defaults: invalid values are accepted, the field is writable.
    ///
    /// # Panics
    ///
    /// If `name` is empty.
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self::with_eq(name, value, |a: &T, b: &T| a == b)
    }
}

impl<T: FieldValue> Field<T> {
    /// Create a field with an explicit equality used to short-circuit
    /// writes of an unchanged value.
    ///
    /// # Panics
    ///
    /// If `name` is empty.
    pub fn with_eq(
        name: impl Into<String>,
        value: T,
        equality: impl Fn(&T, &T) -> bool + 'static,
    ) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "field name must not be empty");

        Self {
            name,
            baseline: value.clone(),
            current: value,
            accept_invalid_value: true,
            read_only: false,
            validator: None,
            io_filter: None,
            equality: Rc::new(equality),
            error_message: None,
            is_changed: false,
            tag: None,
            description: None,
            handlers: Handlers::default(),
            outbox: None,
        }
    }

    // ── builder-style configuration ──────────────────────────────────────

    pub fn accept_invalid(mut self, accept: bool) -> Self {
        self.accept_invalid_value = accept;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn validated_by(mut self, validator: impl Fn(&T) -> ValidationResult + 'static) -> Self {
        self.validator = Some(Rc::new(validator));
        self
    }

    pub fn filtered_by(mut self, filter: impl Fn(T, Direction) -> T + 'static) -> Self {
        self.io_filter = Some(Rc::new(filter));
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tagged(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Run a configuration closure against the field in one step.
    pub fn configure(mut self, configure: impl FnOnce(&mut Self)) -> Self {
        configure(&mut self);
        self
    }

    // ── accessors ────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stored value, passed through the IO filter in the output
    /// direction when one is set.
    pub fn value(&self) -> T {
        match &self.io_filter {
            Some(filter) => filter(self.current.clone(), Direction::Output),
            None => self.current.clone(),
        }
    }

    pub fn is_changed(&self) -> bool {
        self.is_changed
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn accepts_invalid_value(&self) -> bool {
        self.accept_invalid_value
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    // ── configuration setters ────────────────────────────────────────────

    pub fn set_read_only(&mut self, read_only: bool) {
        if self.read_only != read_only {
            self.read_only = read_only;
            self.raise(Property::IsReadOnly);
        }
    }

    pub fn set_accept_invalid_value(&mut self, accept: bool) {
        if self.accept_invalid_value != accept {
            self.accept_invalid_value = accept;
            self.raise(Property::AcceptInvalidValue);
        }
    }

    pub fn set_description(&mut self, description: Option<String>) {
        if self.description != description {
            self.description = description;
            self.raise(Property::Description);
        }
    }

    pub fn set_tag(&mut self, tag: Option<Tag>) {
        let same = match (&self.tag, &tag) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if !same {
            self.tag = tag;
            self.raise(Property::Tag);
        }
    }

    pub fn set_validator(&mut self, validator: Option<Validator<T>>) {
        self.validator = validator;
    }

    pub fn set_io_filter(&mut self, filter: Option<IoFilter<T>>) {
        self.io_filter = filter;
    }

    /// Install a validator that fails with `message` whenever `predicate`
    /// returns false.
    pub fn create_validator(
        &mut self,
        predicate: impl Fn(&T) -> bool + 'static,
        message: impl Into<String>,
    ) {
        let message = message.into();
        self.validator = Some(Rc::new(move |value: &T| {
            ValidationResult::from_bool(predicate(value), message.as_str())
        }));
    }

    // ── mutation protocol ────────────────────────────────────────────────

    /// Write a new value through filter, equality check, validator and the
    /// change notifications.
    ///
    /// The validation outcome is recorded before any commit decision, so a
    /// rejected or cancelled write still updates the error state.
    pub fn set_value(&mut self, value: T) -> Result<WriteOutcome, FieldError> {
        if self.read_only {
            return Err(FieldError::ReadOnly {
                name: self.name.clone(),
            });
        }

        let candidate = match &self.io_filter {
            Some(filter) => filter(value, Direction::Input),
            None => value,
        };

        if (self.equality)(&candidate, &self.value()) {
            return Ok(WriteOutcome::Unchanged);
        }

        let result = self.validate(&candidate);
        self.record(&result);

        let checked = ValidationChecked::new(result, candidate);
        self.handlers.emit_checked(&checked);
        if checked.result().is_failed() {
            self.handlers.emit_invalidated(&checked);
            self.send(FieldSignal::Invalidated(checked.result().clone()));
        }

        if checked.result().is_failed() && !self.accept_invalid_value {
            return Ok(WriteOutcome::Rejected);
        }

        let mut changing = ValueChanging::new(checked.value().clone(), self.value());
        self.handlers.emit_changing(&mut changing);
        if changing.is_cancelled() {
            return Ok(WriteOutcome::Cancelled);
        }

        let changed = changing.into_changed();
        self.current = changed.new_value().clone();
        self.set_changed(true);
        self.handlers.emit_changed(&changed);
        self.raise(Property::Value);

        Ok(WriteOutcome::Committed)
    }

    /// Set both the current value and the baseline, leaving the field clean
    /// and valid.
    ///
    /// Bypasses the read-only flag, filter, validator and change events;
    /// only the generic `Value` notification fires.
    pub fn init(&mut self, value: T) {
        self.baseline = value.clone();
        self.current = value;
        self.raise(Property::Value);
        self.set_error(None);
        self.set_changed(false);
    }

    /// Restore the baseline from the most recent [`init`](Self::init).
    pub fn reset(&mut self) {
        self.current = self.baseline.clone();
        self.raise(Property::Value);
        self.set_error(None);
        self.set_changed(false);
    }

    /// Forget the dirty flag and error without touching the value.
    pub fn clean(&mut self) {
        self.set_changed(false);
        self.set_error(None);
    }

    /// Re-validate the current value and record the outcome.
    ///
    /// Unlike the write path this never emits `Invalidated`.
    pub fn validation_check(&mut self) -> ValidationResult {
        let result = self.validate(&self.value());
        self.record(&result);
        result
    }

    /// Run the validator against `candidate` without touching field state.
    pub fn validate(&self, candidate: &T) -> ValidationResult {
        match &self.validator {
            Some(validator) => validator(candidate),
            None => ValidationResult::success(),
        }
    }

    /// A copy carrying the same name, value and configuration, with the
    /// current value as its baseline, no recorded state and no subscribers.
    pub fn detach(&self) -> Self {
        Self {
            name: self.name.clone(),
            current: self.current.clone(),
            baseline: self.current.clone(),
            accept_invalid_value: self.accept_invalid_value,
            read_only: self.read_only,
            validator: self.validator.clone(),
            io_filter: self.io_filter.clone(),
            equality: Rc::clone(&self.equality),
            error_message: None,
            is_changed: false,
            tag: self.tag.clone(),
            description: self.description.clone(),
            handlers: Handlers::default(),
            outbox: None,
        }
    }

    // ── subscriptions ────────────────────────────────────────────────────

    pub fn on_value_changing(&mut self, handler: impl FnMut(&mut ValueChanging<T>) + 'static) {
        self.handlers.on_changing(handler);
    }

    pub fn on_value_changed(&mut self, handler: impl FnMut(&ValueChanged<T>) + 'static) {
        self.handlers.on_changed(handler);
    }

    pub fn on_validation_checked(
        &mut self,
        handler: impl FnMut(&ValidationChecked<T>) + 'static,
    ) {
        self.handlers.on_checked(handler);
    }

    pub fn on_invalidated(&mut self, handler: impl FnMut(&ValidationChecked<T>) + 'static) {
        self.handlers.on_invalidated(handler);
    }

    pub fn on_property_changed(&mut self, handler: impl FnMut(Property) + 'static) {
        self.handlers.on_property(Box::new(handler));
    }

    // ── internals ────────────────────────────────────────────────────────

    fn record(&mut self, result: &ValidationResult) {
        self.set_error(result.message().map(str::to_owned));
    }

    fn set_error(&mut self, message: Option<String>) {
        if self.error_message == message {
            return;
        }
        let had_error = self.has_error();
        self.error_message = message;
        self.raise(Property::ErrorMessage);

        let has_error = self.has_error();
        if had_error != has_error {
            self.handlers.emit_property(Property::HasError);
            self.send(FieldSignal::ErrorFlag(self.error_message.clone()));
        }
    }

    fn set_changed(&mut self, changed: bool) {
        if self.is_changed != changed {
            self.is_changed = changed;
            self.raise(Property::IsChanged);
        }
    }

    fn raise(&mut self, property: Property) {
        self.handlers.emit_property(property);
        self.send(FieldSignal::Property(property));
    }

    fn send(&mut self, signal: FieldSignal) {
        if let Some(outbox) = self.outbox.as_mut() {
            outbox.push(signal);
        }
    }

    pub(crate) fn attach(&mut self) {
        self.outbox.get_or_insert_with(Vec::new);
    }

    pub(crate) fn take_signals(&mut self) -> Vec<FieldSignal> {
        self.outbox.as_mut().map(std::mem::take).unwrap_or_default()
    }
}

impl<T: FieldValue> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("value", &self.value())
            .field("baseline", &self.baseline)
            .field("is_changed", &self.is_changed)
            .field("error_message", &self.error_message)
            .field("read_only", &self.read_only)
            .field("accept_invalid_value", &self.accept_invalid_value)
            .finish_non_exhaustive()
    }
}
