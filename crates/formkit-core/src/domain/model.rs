use super::set::{FieldSet, SetEvent, Snapshot};

/// A data-entry model composed from a [`FieldSet`].
///
/// Implementors only expose their set; the aggregate behaviour is shared.
pub trait Model {
    fn fields(&self) -> &FieldSet;
    fn fields_mut(&mut self) -> &mut FieldSet;

    fn is_changed(&self) -> bool {
        self.fields().is_changed()
    }

    fn has_error(&self) -> bool {
        self.fields().has_error()
    }

    /// Validate every field in scope; `true` when all passed.
    fn validation_check(&mut self) -> bool {
        self.fields_mut().validation_check()
    }

    fn reset(&mut self) {
        self.fields_mut().reset();
    }

    /// Mark the current values as persisted.
    fn clean(&mut self) {
        self.fields_mut().clean();
    }

    fn snapshot(&self) -> Snapshot {
        self.fields().snapshot()
    }

    fn subscribe(&mut self, subscriber: Box<dyn FnMut(&SetEvent<'_>)>) {
        self.fields_mut().subscribe(subscriber);
    }
}
