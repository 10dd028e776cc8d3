use std::any::type_name;

use crate::domain::{
    error::FieldError,
    field::{FieldValue, Payload},
};

/// A detached, read-only copy of a set's current values.
///
/// Holds no subscribers and no validators, so it is `Send + Sync` and can
/// be handed to a background renderer while the live set stays on the
/// interactive thread.
#[derive(Debug, Default)]
pub struct Snapshot {
    entries: Vec<(String, Payload)>,
}

impl Snapshot {
    pub(crate) fn push(&mut self, name: impl Into<String>, value: Payload) {
        self.entries.push((name.into(), value));
    }

    /// Typed read of a value by field name.
    pub fn get<T: FieldValue>(&self, name: &str) -> Result<&T, FieldError> {
        let payload = self
            .entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
            .ok_or_else(|| FieldError::NotFound {
                name: name.to_owned(),
            })?;

        payload
            .downcast_ref::<T>()
            .ok_or_else(|| FieldError::TypeMismatch {
                name: name.to_owned(),
                expected: type_name::<T>(),
                actual: payload.type_name(),
            })
    }

    pub fn payload(&self, name: &str) -> Option<&Payload> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.payload(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
