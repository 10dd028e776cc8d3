//! `formkit list`

use formkit_adapters::{BookCategory, BookRecord, book::names};
use tracing::instrument;

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

const CSV_HEADER: &str = "id,title,author,publisher,category,price,purchase_date,review_point";

#[instrument(skip_all)]
pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let catalog = super::open_catalog();
    let category = args.category.map(BookCategory::from);

    let records: Vec<BookRecord> = catalog
        .iter()
        .map(|book| book.record())
        .filter(|r| category.is_none_or(|c| r.category == Some(c)))
        .collect();

    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header(&format!("{} book(s)", records.len()))?;
            output.data(&table_header())?;
            for record in &records {
                output.data(&table_row(record))?;
            }
        }
        ListFormat::List => {
            for record in &records {
                output.data(&format!(
                    "{} - {}",
                    record.title.as_deref().unwrap_or_default(),
                    record.author.as_deref().unwrap_or_default()
                ))?;
            }
        }
        ListFormat::Json => output.json(&records)?,
        ListFormat::Csv => {
            output.data(CSV_HEADER)?;
            for record in &records {
                output.data(&csv_row(record))?;
            }
        }
    }

    Ok(())
}

fn table_header() -> String {
    format!(
        "{:>3}  {:<28}  {:<18}  {:<10}  {:>6}  {:<10}  {}",
        "Id", "Title", "Author", "Category", "Price", "Purchased", "Review"
    )
}

fn table_row(r: &BookRecord) -> String {
    let text = |name: &str| super::field_text(r, name);
    format!(
        "{:>3}  {:<28.28}  {:<18.18}  {:<10}  {:>6}  {:<10}  {}",
        r.id,
        text(names::TITLE),
        text(names::AUTHOR),
        text(names::CATEGORY),
        text(names::PRICE),
        text(names::PURCHASE_DATE),
        text(names::REVIEW_POINT),
    )
}

fn csv_row(r: &BookRecord) -> String {
    names::ALL
        .iter()
        .map(|name| csv_field(&super::field_text(r, name)))
        .collect::<Vec<_>>()
        .join(",")
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}
