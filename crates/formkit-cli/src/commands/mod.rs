//! Subcommand handlers. Each translates parsed arguments into catalog and
//! field operations and prints the result; none holds state between runs.

pub mod add;
pub mod completions;
pub mod config;
pub mod edit;
pub mod init;
pub mod list;
pub mod report;
pub mod show;

use std::collections::HashSet;

use formkit_adapters::{BookCatalog, BookRecord, book::names};
use tracing::debug;

use crate::{
    cli::Assignment,
    error::{CliError, CliResult},
};

/// The catalog every command starts from.
pub(crate) fn open_catalog() -> BookCatalog {
    let catalog = BookCatalog::with_samples();
    debug!(books = catalog.len(), "Catalog opened");
    catalog
}

/// Reject command lines that assign the same field twice.
pub(crate) fn check_assignments(assignments: &[Assignment]) -> CliResult<()> {
    let mut seen = HashSet::new();
    for a in assignments {
        if !seen.insert(a.field.as_str()) {
            return Err(CliError::InvalidInput {
                message: format!("{} is assigned more than once", a.field),
                source: None,
            });
        }
    }
    Ok(())
}

/// A field of `record` as the user would type it.
pub(crate) fn field_text(record: &BookRecord, name: &str) -> String {
    match name {
        names::ID => record.id.to_string(),
        names::TITLE => record.title.clone().unwrap_or_default(),
        names::AUTHOR => record.author.clone().unwrap_or_default(),
        names::PUBLISHER => record.publisher.clone().unwrap_or_default(),
        names::CATEGORY => record.category.map(|c| c.to_string()).unwrap_or_default(),
        names::PRICE => record.price.map(|p| p.to_string()).unwrap_or_default(),
        names::PURCHASE_DATE => record
            .purchase_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        names::REVIEW_POINT => record.review_point.map(|p| p.to_string()).unwrap_or_default(),
        _ => String::new(),
    }
}
