//! Cascade from member fields to set-level subscribers.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use super::events::{FilterKind, SetEvent, SetProperty};
use crate::domain::field::{FieldBase, FieldSignal, Property};

pub type FieldFilter = Rc<dyn Fn(&dyn FieldBase) -> bool>;

type Subscriber = Box<dyn FnMut(&SetEvent<'_>)>;

/// Filters and subscribers of one set, kept apart from the field storage
/// so a field can be borrowed mutably while its signals are dispatched.
#[derive(Default)]
pub(crate) struct Hub {
    is_changed: Option<FieldFilter>,
    has_error: Option<FieldFilter>,
    validation_check: Option<FieldFilter>,
    subscribers: Vec<Subscriber>,
}

impl Hub {
    pub(crate) fn filter(&self, kind: FilterKind) -> Option<&FieldFilter> {
        match kind {
            FilterKind::IsChanged => self.is_changed.as_ref(),
            FilterKind::HasError => self.has_error.as_ref(),
            FilterKind::ValidationCheck => self.validation_check.as_ref(),
        }
    }

    pub(crate) fn set_filter(&mut self, kind: FilterKind, filter: Option<FieldFilter>) {
        let slot = match kind {
            FilterKind::IsChanged => &mut self.is_changed,
            FilterKind::HasError => &mut self.has_error,
            FilterKind::ValidationCheck => &mut self.validation_check,
        };
        *slot = filter;
    }

    /// Absent filters include every field.
    pub(crate) fn passes(&self, kind: FilterKind, field: &dyn FieldBase) -> bool {
        self.filter(kind).is_none_or(|f| f(field))
    }

    pub(crate) fn subscribe(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    /// Filters carry over to a detached copy; subscribers do not.
    pub(crate) fn detached(&self) -> Self {
        Self {
            is_changed: self.is_changed.clone(),
            has_error: self.has_error.clone(),
            validation_check: self.validation_check.clone(),
            subscribers: Vec::new(),
        }
    }

    /// Drain a field's queued signals and translate them into set events.
    pub(crate) fn flush(&mut self, field: &mut dyn FieldBase) {
        let signals = field.take_signals();
        if !signals.is_empty() {
            self.dispatch(field, signals);
        }
    }

    fn dispatch(&mut self, field: &dyn FieldBase, signals: Vec<FieldSignal>) {
        for signal in signals {
            match signal {
                FieldSignal::Property(Property::Value) => {
                    self.emit(&SetEvent::PropertyChanged(SetProperty::Field(field.name())));
                }
                FieldSignal::Property(Property::IsChanged) => {
                    if self.passes(FilterKind::IsChanged, field) {
                        self.emit(&SetEvent::PropertyChanged(SetProperty::IsChanged));
                    }
                }
                FieldSignal::Property(_) => {}
                FieldSignal::ErrorFlag(raised) => {
                    if self.passes(FilterKind::HasError, field) {
                        self.emit(&SetEvent::PropertyChanged(SetProperty::HasError));
                        match raised {
                            Some(message) => self.emit(&SetEvent::ErrorRaised {
                                field,
                                message: &message,
                            }),
                            None => self.emit(&SetEvent::ErrorCleared(field)),
                        }
                    }
                }
                FieldSignal::Invalidated(result) => {
                    self.emit(&SetEvent::FieldInvalidated {
                        field,
                        result: &result,
                    });
                }
            }
        }
    }

    fn emit(&mut self, event: &SetEvent<'_>) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }
}

impl fmt::Debug for Hub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hub")
            .field("is_changed_filter", &self.is_changed.is_some())
            .field("has_error_filter", &self.has_error.is_some())
            .field("validation_check_filter", &self.validation_check.is_some())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Mutable access to a member field.
///
/// What the field reports while borrowed is cascaded to the set's
/// subscribers before the next mutable access through the guard, and
/// finally when the guard drops.
pub struct FieldMut<'a, F: ?Sized + FieldBase> {
    field: &'a mut F,
    hub: &'a mut Hub,
}

impl<'a, F: ?Sized + FieldBase> FieldMut<'a, F> {
    pub(crate) fn new(field: &'a mut F, hub: &'a mut Hub) -> Self {
        Self { field, hub }
    }
}

impl<F: ?Sized + FieldBase> Deref for FieldMut<'_, F> {
    type Target = F;

    fn deref(&self) -> &F {
        self.field
    }
}

impl<F: ?Sized + FieldBase> FieldMut<'_, F> {
    fn flush(&mut self) {
        let signals = self.field.take_signals();
        if !signals.is_empty() {
            self.hub.dispatch(self.field.as_base(), signals);
        }
    }
}

impl<F: ?Sized + FieldBase> DerefMut for FieldMut<'_, F> {
    fn deref_mut(&mut self) -> &mut F {
        self.flush();
        self.field
    }
}

impl<F: ?Sized + FieldBase> Drop for FieldMut<'_, F> {
    fn drop(&mut self) {
        self.flush();
    }
}

impl<F: ?Sized + FieldBase> fmt::Debug for FieldMut<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldMut").field(&self.field).finish()
    }
}
