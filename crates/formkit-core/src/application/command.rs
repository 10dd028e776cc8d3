//! Named actions whose availability follows a model's state.

use std::fmt;

use tracing::{debug, instrument, warn};

use crate::{
    application::AppError,
    domain::Model,
    error::FormkitResult,
};

type Action<M> = Box<dyn FnMut(&mut M) -> FormkitResult<()>>;
type Guard<M> = Box<dyn Fn(&M) -> bool>;

/// An action over a model, with an enablement flag and an optional guard
/// evaluated against the model at call time.
pub struct Command<M> {
    name: String,
    description: Option<String>,
    enabled: bool,
    action: Action<M>,
    guard: Option<Guard<M>>,
}

impl<M> Command<M> {
    pub fn new(
        name: impl Into<String>,
        action: impl FnMut(&mut M) -> FormkitResult<()> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            enabled: true,
            action: Box::new(action),
            guard: None,
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Only allow execution while `guard` holds for the model.
    pub fn guarded_by(mut self, guard: impl Fn(&M) -> bool + 'static) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn can_execute(&self, model: &M) -> bool {
        self.enabled && self.guard.as_ref().is_none_or(|guard| guard(model))
    }

    /// Run the action, or fail with [`AppError::CommandDisabled`].
    #[instrument(skip_all, fields(command = %self.name))]
    pub fn execute(&mut self, model: &mut M) -> FormkitResult<()> {
        if !self.can_execute(model) {
            warn!("Command refused by its guard");
            return Err(AppError::CommandDisabled {
                name: self.name.clone(),
            }
            .into());
        }

        debug!("Executing command");
        (self.action)(model)
    }
}

impl<M> fmt::Debug for Command<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("enabled", &self.enabled)
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}

/// The usual guard for save-like commands: something changed and nothing
/// is in error.
pub fn commit_guard<M: Model>(model: &M) -> bool {
    model.is_changed() && !model.has_error()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldKey, FieldSet};
    use crate::error::FormkitError;

    struct Note {
        set: FieldSet,
        text: FieldKey<String>,
        saves: u32,
    }

    impl Note {
        fn new() -> Self {
            let mut set = FieldSet::new();
            let text = set.create_field_with("Text", String::new(), |f| {
                f.create_validator(|s| s.len() <= 5, "too long");
            });
            Self { set, text, saves: 0 }
        }

        fn write(&mut self, text: &str) {
            let key = self.text;
            self.set.get_mut(key).unwrap().set_value(text.into()).unwrap();
        }
    }

    impl Model for Note {
        fn fields(&self) -> &FieldSet {
            &self.set
        }

        fn fields_mut(&mut self) -> &mut FieldSet {
            &mut self.set
        }
    }

    fn save() -> Command<Note> {
        Command::new("save", |note: &mut Note| {
            note.saves += 1;
            note.clean();
            Ok(())
        })
        .described("Save the note")
        .guarded_by(commit_guard)
    }

    #[test]
    fn unchanged_model_cannot_commit() {
        let mut note = Note::new();
        let mut cmd = save();

        assert!(!cmd.can_execute(&note));
        let err = cmd.execute(&mut note).unwrap_err();

        assert!(matches!(
            err,
            FormkitError::Application(AppError::CommandDisabled { .. })
        ));
        assert_eq!(note.saves, 0);
    }

    #[test]
    fn changed_valid_model_commits() {
        let mut note = Note::new();
        let mut cmd = save();
        note.write("hi");

        cmd.execute(&mut note).unwrap();

        assert_eq!(note.saves, 1);
        assert!(!note.is_changed());
        assert!(!cmd.can_execute(&note));
    }

    #[test]
    fn field_error_blocks_commit() {
        let mut note = Note::new();
        note.write("hi");
        note.write("far too long");

        assert!(note.has_error());
        assert!(!save().can_execute(&note));
    }

    #[test]
    fn disabled_command_ignores_guard() {
        let mut note = Note::new();
        note.write("hi");
        let mut cmd = save();
        cmd.set_enabled(false);

        assert!(!cmd.can_execute(&note));
        assert_eq!(cmd.name(), "save");
        assert_eq!(cmd.description(), Some("Save the note"));
    }
}
