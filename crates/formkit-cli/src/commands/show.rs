//! `formkit show <id>`

use formkit_core::domain::{FieldBase, Model};
use tracing::instrument;

use crate::{cli::ShowArgs, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(id = args.id))]
pub fn execute(args: ShowArgs, output: OutputManager) -> CliResult<()> {
    let catalog = super::open_catalog();
    let book = catalog.get(args.id)?;
    let record = book.record();

    if output.is_json() {
        output.json(&record)?;
        return Ok(());
    }

    output.header(&format!("Book {}: {book}", record.id))?;
    for field in book.fields() {
        output.data(&field_line(field, &super::field_text(&record, field.name())))?;
    }
    Ok(())
}

fn field_line(field: &dyn FieldBase, value: &str) -> String {
    let mut line = format!("{:<13} {value}", field.name());
    if field.is_read_only() {
        line.push_str("  [read-only]");
    }
    if let Some(description) = field.description() {
        line.push_str(&format!("  ({description})"));
    }
    if let Some(message) = field.error_message() {
        line.push_str(&format!("  ! {message}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use formkit_adapters::Book;

    use super::*;

    #[test]
    fn field_line_marks_read_only_and_errors() {
        let mut book = Book::samples().remove(0);
        book.assign("Price", "-1").unwrap();

        let id = book.fields().field("Id").unwrap();
        assert_eq!(field_line(id, "1"), "Id            1  [read-only]");

        let price = book.fields().field("Price").unwrap();
        assert_eq!(
            field_line(price, "1200"),
            "Price         1200  (Enter the price.)  ! Price is invalid."
        );
    }
}
