//! `formkit edit <id> --set FIELD=VALUE... [--commit]`
//!
//! Every assignment goes through the field's write path; the set events it
//! raises are echoed back. The commit itself is a [`Command`] guarded by
//! [`commit_guard`], so it is refused while the book is unchanged or has a
//! field in error.

use std::cell::RefCell;
use std::rc::Rc;

use formkit_adapters::{BookCatalog, BookRecord, book::names};
use formkit_core::{
    application::{Command, commit_guard},
    domain::{Model, SetEvent, SetProperty, WriteOutcome},
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    cli::{Assignment, EditArgs},
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct EditSummary {
    id: u32,
    changes: Vec<Change>,
    errors: Vec<FieldMessage>,
    committed: bool,
    record: BookRecord,
}

#[derive(Debug, Serialize)]
struct Change {
    field: String,
    before: String,
    after: String,
}

#[derive(Debug, Serialize)]
struct FieldMessage {
    field: String,
    message: String,
}

#[instrument(skip_all, fields(id = args.id))]
pub fn execute(args: EditArgs, output: OutputManager) -> CliResult<()> {
    super::check_assignments(&args.assignments)?;
    let mut catalog = super::open_catalog();
    let id = args.id;
    let before = catalog.get(id)?.record();

    let events = Rc::new(RefCell::new(Vec::new()));
    {
        let sink = Rc::clone(&events);
        catalog
            .get_mut(id)?
            .subscribe(Box::new(move |event: &SetEvent<'_>| {
                sink.borrow_mut().push(describe(event));
            }));
    }

    for assignment in &args.assignments {
        let outcome = catalog.get_mut(id)?.assign(&assignment.field, &assignment.value)?;
        let trace: Vec<String> = events.borrow_mut().drain(..).collect();
        if output.is_json() {
            continue;
        }
        output.print(&outcome_line(assignment, outcome))?;
        for line in &trace {
            output.note(line)?;
        }
    }

    let mut commit = Command::new("commit", move |catalog: &mut BookCatalog| catalog.commit(id))
        .described("Store the edited book")
        .guarded_by(move |catalog: &BookCatalog| catalog.get(id).is_ok_and(commit_guard));

    let book = catalog.get(id)?;
    let changes = diff(&before, &book.record());
    let errors: Vec<FieldMessage> = book
        .fields()
        .errors()
        .map(|f| FieldMessage {
            field: f.name().to_owned(),
            message: f.error_message().unwrap_or_default().to_owned(),
        })
        .collect();
    let can_commit = commit.can_execute(&catalog);

    if args.commit && !can_commit {
        let reason = if changes.is_empty() {
            "nothing changed".to_owned()
        } else {
            let names: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
            format!("fields in error: {}", names.join(", "))
        };
        print_errors(&output, &errors)?;
        return Err(CliError::CommitRefused { id, reason });
    }

    let committed = if args.commit {
        commit.execute(&mut catalog)?;
        info!(changes = changes.len(), "Edits committed");
        true
    } else {
        false
    };

    let book = catalog.get_mut(id)?;
    let summary = EditSummary {
        id,
        changes,
        errors,
        committed,
        record: book.record(),
    };
    if !committed {
        // Nothing is stored between runs; an uncommitted edit is dropped.
        book.reset();
    }

    if output.is_json() {
        output.json(&summary)?;
        return Ok(());
    }

    print_errors(&output, &summary.errors)?;
    if committed {
        output.success(&format!("Book {id} committed"))?;
        for change in &summary.changes {
            output.print(&format!(
                "  {}: {} -> {}",
                change.field, change.before, change.after
            ))?;
        }
    } else if can_commit {
        output.info("Edits are valid; rerun with --commit to store them")?;
    } else if summary.changes.is_empty() {
        output.info("Nothing changed")?;
    } else {
        output.warning("Commit unavailable until the errors above are fixed")?;
    }
    Ok(())
}

fn outcome_line(assignment: &Assignment, outcome: WriteOutcome) -> String {
    let verdict = match outcome {
        WriteOutcome::Committed => "set",
        WriteOutcome::Unchanged => "unchanged",
        WriteOutcome::Rejected => "rejected",
        WriteOutcome::Cancelled => "cancelled",
    };
    format!("{assignment}: {verdict}")
}

fn describe(event: &SetEvent<'_>) -> String {
    match event {
        SetEvent::PropertyChanged(SetProperty::Field(name)) => format!("{name} changed"),
        SetEvent::PropertyChanged(property) => format!("{} updated", property.name()),
        SetEvent::FieldInvalidated { field, result } => format!(
            "{} invalid: {}",
            field.name(),
            result.message().unwrap_or_default()
        ),
        SetEvent::ErrorRaised { field, message } => {
            format!("{} error raised: {message}", field.name())
        }
        SetEvent::ErrorCleared(field) => format!("{} error cleared", field.name()),
    }
}

fn diff(before: &BookRecord, after: &BookRecord) -> Vec<Change> {
    names::ALL
        .iter()
        .filter_map(|name| {
            let (old, new) = (super::field_text(before, name), super::field_text(after, name));
            (old != new).then(|| Change {
                field: (*name).to_owned(),
                before: old,
                after: new,
            })
        })
        .collect()
}

fn print_errors(output: &OutputManager, errors: &[FieldMessage]) -> CliResult<()> {
    for e in errors {
        output.error(&format!("{}: {}", e.field, e.message))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use formkit_adapters::Book;

    use super::*;

    fn capture(book: &mut Book) -> Rc<RefCell<Vec<String>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        book.subscribe(Box::new(move |event: &SetEvent<'_>| {
            sink.borrow_mut().push(describe(event));
        }));
        seen
    }

    #[test]
    fn describes_a_valid_write() {
        let mut book = Book::samples().remove(1);
        let seen = capture(&mut book);

        book.assign("Price", "900").unwrap();

        assert!(seen.borrow().contains(&"Price changed".to_owned()));
    }

    #[test]
    fn describes_a_rejected_write() {
        let mut book = Book::samples().remove(1);
        let seen = capture(&mut book);

        book.assign("ReviewPoint", "8").unwrap();

        let seen = seen.borrow();
        assert!(seen.contains(&"ReviewPoint invalid: Review point is invalid.".to_owned()));
        assert!(seen.contains(&"ReviewPoint error raised: Review point is invalid.".to_owned()));
        assert!(!seen.contains(&"ReviewPoint changed".to_owned()));
    }

    #[test]
    fn diff_lists_changed_fields_only() {
        let before = Book::samples().remove(0).record();
        let after = BookRecord {
            price: Some(1500),
            ..before.clone()
        };

        let changes = diff(&before, &after);

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "Price");
        assert_eq!(changes[0].before, "1200");
        assert_eq!(changes[0].after, "1500");
    }

    #[test]
    fn outcome_lines() {
        let a = Assignment {
            field: "Price".into(),
            value: "5".into(),
        };
        assert_eq!(outcome_line(&a, WriteOutcome::Rejected), "Price=5: rejected");
    }
}
