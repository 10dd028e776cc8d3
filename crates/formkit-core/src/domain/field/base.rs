//! Type-erased access to a [`Field`].
//!
//! A [`FieldSet`](crate::domain::FieldSet) holds fields of many value types
//! behind `Box<dyn FieldBase>`. Values cross the boundary as a [`Payload`]
//! and are checked by downcast; a wrong type is a
//! [`FieldError::TypeMismatch`], never an unchecked cast.

use std::any::{Any, type_name};
use std::fmt;

use super::{Field, FieldSignal, FieldValue, Property, WriteOutcome};
use crate::domain::{error::FieldError, validation::ValidationResult};

/// An opaque, thread-safe field value that remembers its type name.
pub struct Payload {
    value: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Payload {
    pub fn new<T: FieldValue>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    /// Take the value out, handing the payload back untouched on mismatch.
    pub fn downcast<T: 'static>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        self.value
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|value| Self { value, type_name })
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// The non-generic protocol every field exposes to its container.
pub trait FieldBase: Any + fmt::Debug {
    fn name(&self) -> &str;
    fn is_changed(&self) -> bool;
    fn has_error(&self) -> bool;
    fn error_message(&self) -> Option<&str>;
    fn is_read_only(&self) -> bool;
    fn accepts_invalid_value(&self) -> bool;
    fn description(&self) -> Option<&str>;

    /// Type name of the stored value.
    fn value_type(&self) -> &'static str;

    /// Current (output-filtered) value.
    fn payload(&self) -> Payload;

    /// Write through the full mutation protocol.
    fn set_payload(&mut self, value: Payload) -> Result<WriteOutcome, FieldError>;

    fn validation_check(&mut self) -> ValidationResult;
    fn clean(&mut self);
    fn reset(&mut self);

    /// `Debug` rendering of the current value.
    fn debug_value(&self) -> String;

    /// See [`Field::detach`].
    fn detach(&self) -> Box<dyn FieldBase>;

    fn on_property_changed(&mut self, handler: Box<dyn FnMut(Property)>);

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn as_base(&self) -> &dyn FieldBase;

    #[doc(hidden)]
    fn attach(&mut self);
    #[doc(hidden)]
    fn take_signals(&mut self) -> Vec<FieldSignal>;
}

impl<T: FieldValue> FieldBase for Field<T> {
    fn name(&self) -> &str {
        Field::name(self)
    }

    fn is_changed(&self) -> bool {
        Field::is_changed(self)
    }

    fn has_error(&self) -> bool {
        Field::has_error(self)
    }

    fn error_message(&self) -> Option<&str> {
        Field::error_message(self)
    }

    fn is_read_only(&self) -> bool {
        Field::is_read_only(self)
    }

    fn accepts_invalid_value(&self) -> bool {
        Field::accepts_invalid_value(self)
    }

    fn description(&self) -> Option<&str> {
        Field::description(self)
    }

    fn value_type(&self) -> &'static str {
        type_name::<T>()
    }

    fn payload(&self) -> Payload {
        Payload::new(self.value())
    }

    fn set_payload(&mut self, value: Payload) -> Result<WriteOutcome, FieldError> {
        match value.downcast::<T>() {
            Ok(value) => self.set_value(value),
            Err(other) => Err(FieldError::TypeMismatch {
                name: self.name().to_owned(),
                expected: type_name::<T>(),
                actual: other.type_name(),
            }),
        }
    }

    fn validation_check(&mut self) -> ValidationResult {
        Field::validation_check(self)
    }

    fn clean(&mut self) {
        Field::clean(self);
    }

    fn reset(&mut self) {
        Field::reset(self);
    }

    fn debug_value(&self) -> String {
        format!("{:?}", self.value())
    }

    fn detach(&self) -> Box<dyn FieldBase> {
        Box::new(Field::detach(self))
    }

    fn on_property_changed(&mut self, handler: Box<dyn FnMut(Property)>) {
        self.handlers.on_property(handler);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_base(&self) -> &dyn FieldBase {
        self
    }

    fn attach(&mut self) {
        Field::attach(self);
    }

    fn take_signals(&mut self) -> Vec<FieldSignal> {
        Field::take_signals(self)
    }
}
