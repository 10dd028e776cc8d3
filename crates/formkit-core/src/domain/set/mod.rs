//! [`FieldSet`]: an ordered, name-addressable collection of fields.
//!
//! The set owns its fields exclusively. Each field is attached on insertion
//! so that its property, error-flag and invalidation notifications queue up
//! for the set. Mutable access goes through a [`FieldMut`] guard (or a bulk
//! operation) which forwards those notifications to set subscribers:
//!
//! ```text
//!   Field ──FieldSignal──► outbox ──(guard / bulk op)──► Hub ──SetEvent──► subscribers
//! ```

mod events;
mod hub;
mod snapshot;

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

pub use events::{FilterKind, SetEvent, SetProperty};
pub use hub::{FieldFilter, FieldMut};
pub use snapshot::Snapshot;

use crate::domain::{
    error::FieldError,
    field::{Field, FieldBase, FieldValue, Payload},
};
use hub::Hub;

static NEXT_SET_ID: AtomicU64 = AtomicU64::new(1);

/// Typed handle to a field inside the set that created it.
///
/// A key also resolves in detached copies of that set, which share its
/// layout. Any other set refuses it with [`FieldError::ForeignKey`].
pub struct FieldKey<T> {
    set: u64,
    index: usize,
    marker: PhantomData<fn() -> T>,
}

impl<T> FieldKey<T> {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for FieldKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldKey<T> {}

impl<T> fmt::Debug for FieldKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldKey<{}>({})", type_name::<T>(), self.index)
    }
}

impl<T> PartialEq for FieldKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.set == other.set && self.index == other.index
    }
}

impl<T> Eq for FieldKey<T> {}

#[derive(Debug)]
pub struct FieldSet {
    id: u64,
    fields: Vec<Box<dyn FieldBase>>,
    hub: Hub,
}

impl Default for FieldSet {
    fn default() -> Self {
        Self {
            id: NEXT_SET_ID.fetch_add(1, Ordering::Relaxed),
            fields: Vec::new(),
            hub: Hub::default(),
        }
    }
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    // ── membership ───────────────────────────────────────────────────────

    /// Append a field. Membership is fixed for the life of the set.
    pub fn add_field<T: FieldValue>(&mut self, field: Field<T>) -> FieldKey<T> {
        let index = self.push(Box::new(field));
        FieldKey {
            set: self.id,
            index,
            marker: PhantomData,
        }
    }

    /// Create and append a field with explicit flags.
    pub fn create_field<T: FieldValue + PartialEq>(
        &mut self,
        name: impl Into<String>,
        initial: T,
        accept_invalid_value: bool,
        read_only: bool,
    ) -> FieldKey<T> {
        self.add_field(
            Field::new(name, initial)
                .accept_invalid(accept_invalid_value)
                .read_only(read_only),
        )
    }

    /// Create a field that rejects invalid values, configure it, then
    /// append it.
    pub fn create_field_with<T: FieldValue + PartialEq>(
        &mut self,
        name: impl Into<String>,
        initial: T,
        configure: impl FnOnce(&mut Field<T>),
    ) -> FieldKey<T> {
        let field = Field::new(name, initial)
            .accept_invalid(false)
            .configure(configure);
        self.add_field(field)
    }

    fn push(&mut self, mut field: Box<dyn FieldBase>) -> usize {
        field.attach();
        self.fields.push(field);
        self.fields.len() - 1
    }

    // ── lookup ───────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn position(&self, name: &str) -> Result<usize, FieldError> {
        self.fields
            .iter()
            .position(|f| f.name() == name)
            .ok_or_else(|| FieldError::NotFound {
                name: name.to_owned(),
            })
    }

    fn check_index(&self, index: usize) -> Result<(), FieldError> {
        if index < self.fields.len() {
            Ok(())
        } else {
            Err(FieldError::OutOfRange {
                index,
                len: self.fields.len(),
            })
        }
    }

    /// First field with this name.
    pub fn field(&self, name: &str) -> Result<&dyn FieldBase, FieldError> {
        let index = self.position(name)?;
        Ok(self.fields[index].as_ref())
    }

    pub fn field_mut(&mut self, name: &str) -> Result<FieldMut<'_, dyn FieldBase>, FieldError> {
        let index = self.position(name)?;
        Ok(FieldMut::new(self.fields[index].as_mut(), &mut self.hub))
    }

    pub fn at(&self, index: usize) -> Result<&dyn FieldBase, FieldError> {
        self.check_index(index)?;
        Ok(self.fields[index].as_ref())
    }

    pub fn at_mut(&mut self, index: usize) -> Result<FieldMut<'_, dyn FieldBase>, FieldError> {
        self.check_index(index)?;
        Ok(FieldMut::new(self.fields[index].as_mut(), &mut self.hub))
    }

    /// Typed lookup by name.
    pub fn typed<T: FieldValue>(&self, name: &str) -> Result<&Field<T>, FieldError> {
        let index = self.position(name)?;
        downcast(self.fields[index].as_ref(), name)
    }

    pub fn typed_mut<T: FieldValue>(
        &mut self,
        name: &str,
    ) -> Result<FieldMut<'_, Field<T>>, FieldError> {
        let index = self.position(name)?;
        self.typed_at_mut(index)
    }

    fn check_key<T>(&self, key: FieldKey<T>) -> Result<(), FieldError> {
        if key.set != self.id {
            return Err(FieldError::ForeignKey { index: key.index });
        }
        self.check_index(key.index)
    }

    pub fn get<T: FieldValue>(&self, key: FieldKey<T>) -> Result<&Field<T>, FieldError> {
        self.check_key(key)?;
        let field = self.fields[key.index].as_ref();
        downcast(field, field.name())
    }

    pub fn get_mut<T: FieldValue>(
        &mut self,
        key: FieldKey<T>,
    ) -> Result<FieldMut<'_, Field<T>>, FieldError> {
        self.check_key(key)?;
        self.typed_at_mut(key.index)
    }

    fn typed_at_mut<T: FieldValue>(
        &mut self,
        index: usize,
    ) -> Result<FieldMut<'_, Field<T>>, FieldError> {
        let err = mismatch::<T>(self.fields[index].as_ref());
        match self.fields[index].as_any_mut().downcast_mut::<Field<T>>() {
            Some(field) => Ok(FieldMut::new(field, &mut self.hub)),
            None => Err(err),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn FieldBase> {
        self.fields.iter().map(|f| f.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name())
    }

    /// Current values in field order.
    pub fn values(&self) -> impl Iterator<Item = Payload> + '_ {
        self.fields.iter().map(|f| f.payload())
    }

    // ── aggregates ───────────────────────────────────────────────────────

    /// Any field passing the dirty filter has uncommitted changes.
    pub fn is_changed(&self) -> bool {
        self.fields
            .iter()
            .any(|f| f.is_changed() && self.hub.passes(FilterKind::IsChanged, f.as_ref()))
    }

    /// Any field passing the error filter currently holds an error.
    pub fn has_error(&self) -> bool {
        self.fields
            .iter()
            .any(|f| f.has_error() && self.hub.passes(FilterKind::HasError, f.as_ref()))
    }

    /// Every erroring field, ignoring the error filter.
    pub fn errors(&self) -> impl Iterator<Item = &dyn FieldBase> {
        self.iter().filter(|f| f.has_error())
    }

    /// Error message of the named field, `None` when absent or valid.
    pub fn error_for(&self, name: &str) -> Option<&str> {
        self.field(name).ok().and_then(|f| f.error_message())
    }

    /// A single-line summary suitable for a form-level error slot.
    pub fn error_summary(&self) -> Option<&'static str> {
        self.has_error().then_some("Has Error")
    }

    // ── bulk operations ──────────────────────────────────────────────────

    /// Re-validate every field passing the validation filter.
    ///
    /// Returns `true` when every checked field passed.
    pub fn validation_check(&mut self) -> bool {
        let mut all_passed = true;
        for field in &mut self.fields {
            if !self.hub.passes(FilterKind::ValidationCheck, field.as_ref()) {
                continue;
            }
            if field.validation_check().is_failed() {
                all_passed = false;
            }
            self.hub.flush(field.as_mut());
        }
        all_passed
    }

    /// Clear dirty and error state on every field. Filters do not apply.
    pub fn clean(&mut self) {
        for field in &mut self.fields {
            field.clean();
            self.hub.flush(field.as_mut());
        }
    }

    pub fn reset(&mut self) {
        self.reset_where(|_| true);
    }

    pub fn reset_where(&mut self, filter: impl Fn(&dyn FieldBase) -> bool) {
        for field in &mut self.fields {
            if filter(field.as_ref()) {
                field.reset();
                self.hub.flush(field.as_mut());
            }
        }
    }

    /// Copy values by name from `source` into this set.
    pub fn set_values<'s>(
        &mut self,
        source: impl IntoIterator<Item = &'s dyn FieldBase>,
    ) -> Result<(), FieldError> {
        self.set_values_where(source, |_| true)
    }

    /// Copy values by name from the `source` fields passing `filter`.
    ///
    /// Each value goes through the target's full write path. Source fields
    /// with no same-named target are skipped.
    pub fn set_values_where<'s>(
        &mut self,
        source: impl IntoIterator<Item = &'s dyn FieldBase>,
        filter: impl Fn(&dyn FieldBase) -> bool,
    ) -> Result<(), FieldError> {
        for src in source.into_iter().filter(|f| filter(*f)) {
            let Ok(index) = self.position(src.name()) else {
                continue;
            };
            let target = &mut self.fields[index];
            let written = target.set_payload(src.payload());
            self.hub.flush(target.as_mut());
            written?;
        }
        Ok(())
    }

    // ── configuration ────────────────────────────────────────────────────

    pub fn set_filter(
        &mut self,
        kind: FilterKind,
        filter: impl Fn(&dyn FieldBase) -> bool + 'static,
    ) {
        self.hub.set_filter(kind, Some(Rc::new(filter)));
    }

    pub fn clear_filter(&mut self, kind: FilterKind) {
        self.hub.set_filter(kind, None);
    }

    pub fn has_filter(&self, kind: FilterKind) -> bool {
        self.hub.filter(kind).is_some()
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&SetEvent<'_>) + 'static) {
        self.hub.subscribe(Box::new(subscriber));
    }

    // ── detached copies ──────────────────────────────────────────────────

    /// Thread-safe copy of every current value.
    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::default();
        for field in &self.fields {
            snapshot.push(field.name(), field.payload());
        }
        snapshot
    }

    /// A fresh set with the same fields, values as new baselines, clean
    /// state, the same filters and no subscribers.
    pub fn detached(&self) -> Self {
        let mut set = Self {
            id: self.id,
            fields: Vec::with_capacity(self.fields.len()),
            hub: self.hub.detached(),
        };
        for field in &self.fields {
            set.push(field.detach());
        }
        set
    }
}

fn downcast<'f, T: FieldValue>(
    field: &'f dyn FieldBase,
    name: &str,
) -> Result<&'f Field<T>, FieldError> {
    field
        .as_any()
        .downcast_ref::<Field<T>>()
        .ok_or_else(|| FieldError::TypeMismatch {
            name: name.to_owned(),
            expected: type_name::<T>(),
            actual: field.value_type(),
        })
}

fn mismatch<T: FieldValue>(field: &dyn FieldBase) -> FieldError {
    FieldError::TypeMismatch {
        name: field.name().to_owned(),
        expected: type_name::<T>(),
        actual: field.value_type(),
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a dyn FieldBase;
    type IntoIter = Box<dyn Iterator<Item = &'a dyn FieldBase> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
