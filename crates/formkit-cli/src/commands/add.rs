//! `formkit add --set FIELD=VALUE...`

use formkit_adapters::Book;
use formkit_core::domain::Model;
use tracing::instrument;

use crate::{cli::AddArgs, error::CliResult, output::OutputManager};

#[instrument(skip_all)]
pub fn execute(args: AddArgs, output: OutputManager) -> CliResult<()> {
    super::check_assignments(&args.assignments)?;
    let mut catalog = super::open_catalog();
    let mut book = Book::new();

    for assignment in &args.assignments {
        book.assign(&assignment.field, &assignment.value)?;
    }

    if !book.validation_check() {
        for field in book.fields().errors() {
            output.error(&format!(
                "{}: {}",
                field.name(),
                field.error_message().unwrap_or_default()
            ))?;
        }
    }

    let id = catalog.add(book)?;
    let added = catalog.get(id)?;

    if output.is_json() {
        output.json(&added.record())?;
    } else {
        output.success(&format!("Added book {id}: {added}"))?;
    }
    Ok(())
}
