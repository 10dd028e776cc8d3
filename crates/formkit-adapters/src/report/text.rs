//! Plain-text book list, paginated with a header on every page.

use formkit_core::{
    application::ReportRenderer,
    domain::Snapshot,
    error::FormkitResult,
};
use tracing::debug;

use crate::book::BookRecord;

pub const DEFAULT_TITLE: &str = "Book List";
pub const DEFAULT_PAGE_LINES: usize = 23;

const COLUMNS: [(&str, usize, Align); 8] = [
    ("No", 4, Align::Right),
    ("Title", 28, Align::Left),
    ("Author", 20, Align::Left),
    ("Publisher", 16, Align::Left),
    ("Category", 10, Align::Left),
    ("Price", 8, Align::Right),
    ("Purchased", 10, Align::Left),
    ("Review", 6, Align::Left),
];

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Right,
}

/// Renders book snapshots as a fixed-width table, `page_lines` rows per page.
#[derive(Debug, Clone)]
pub struct BookListRenderer {
    title: String,
    page_lines: usize,
}

impl BookListRenderer {
    pub fn new(title: impl Into<String>, page_lines: usize) -> Self {
        Self {
            title: title.into(),
            page_lines: page_lines.max(1),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn page_lines(&self) -> usize {
        self.page_lines
    }

    fn header(&self, out: &mut String, page: usize) {
        let width = table_width();
        let label = format!("Page.{page}");
        let pad = width.saturating_sub(self.title.chars().count() + label.len()).max(1);
        out.push_str(&format!("{}{:pad$}{label}\n", self.title, ""));

        let cells = COLUMNS.map(|(name, _, _)| name.to_owned());
        push_row(out, &cells);
        out.push_str(&"-".repeat(width));
        out.push('\n');
    }
}

impl Default for BookListRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, DEFAULT_PAGE_LINES)
    }
}

impl ReportRenderer for BookListRenderer {
    fn render(&self, rows: &[Snapshot]) -> FormkitResult<String> {
        let records = rows
            .iter()
            .map(BookRecord::from_snapshot)
            .collect::<FormkitResult<Vec<_>>>()?;

        let page_count = records.len().div_ceil(self.page_lines).max(1);
        let mut out = String::new();
        for page in 0..page_count {
            if page > 0 {
                out.push('\n');
            }
            self.header(&mut out, page + 1);

            let start = page * self.page_lines;
            let end = (start + self.page_lines).min(records.len());
            for record in &records[start..end] {
                push_row(&mut out, &cells(record));
            }
        }

        debug!(rows = records.len(), pages = page_count, "Rendered book list");
        Ok(out)
    }
}

fn table_width() -> usize {
    COLUMNS.iter().map(|(_, w, _)| w).sum::<usize>() + COLUMNS.len() - 1
}

fn cells(record: &BookRecord) -> [String; 8] {
    [
        record.id.to_string(),
        record.title.clone().unwrap_or_default(),
        record.author.clone().unwrap_or_default(),
        record.publisher.clone().unwrap_or_default(),
        record
            .category
            .map(|c| c.display_name().to_owned())
            .unwrap_or_default(),
        record.price.map(thousands).unwrap_or_default(),
        record
            .purchase_date
            .map(|d| d.format("%Y/%m/%d").to_string())
            .unwrap_or_default(),
        record
            .review_point
            .map(|p| "★".repeat(p.clamp(0, 5) as usize))
            .unwrap_or_default(),
    ]
}

fn push_row(out: &mut String, cells: &[String; 8]) {
    let line = COLUMNS
        .iter()
        .zip(cells)
        .map(|(&(_, w, align), cell)| match align {
            Align::Left => format!("{cell:<w$.w$}"),
            Align::Right => format!("{cell:>w$.w$}"),
        })
        .collect::<Vec<_>>()
        .join(" ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// `1234567` becomes `1,234,567`.
fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if n < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
mod tests {
    use formkit_core::domain::Model;

    use super::*;
    use crate::book::Book;

    fn sample_rows() -> Vec<Snapshot> {
        Book::samples().iter().map(Model::snapshot).collect()
    }

    #[test]
    fn formats_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(950), "950");
        assert_eq!(thousands(1200), "1,200");
        assert_eq!(thousands(-1234567), "-1,234,567");
    }

    #[test]
    fn renders_one_page_per_chunk() {
        let out = BookListRenderer::new("Library", 4).render(&sample_rows()).unwrap();

        let pages: Vec<&str> = out.split("\n\n").collect();
        assert_eq!(pages.len(), 3);
        assert!(pages[0].starts_with("Library"));
        assert!(pages[0].lines().next().unwrap().ends_with("Page.1"));
        assert!(pages[2].lines().next().unwrap().ends_with("Page.3"));
        // title, header, rule, then rows
        assert_eq!(pages[0].lines().count(), 3 + 4);
        assert_eq!(pages[2].lines().count(), 3 + 2);
    }

    #[test]
    fn row_cells_are_formatted() {
        let out = BookListRenderer::default().render(&sample_rows()).unwrap();

        let dogra = out.lines().nth(3).unwrap();
        assert!(dogra.trim_start().starts_with("1 Dogra Magra"));
        assert!(dogra.contains("1,200"));
        assert!(dogra.contains("2014/01/10"));
        assert!(dogra.ends_with("★★★★★"));
        assert!(dogra.contains("Novel"));
    }

    #[test]
    fn long_cells_are_truncated() {
        let mut book = Book::samples().remove(0);
        book.assign("Title", &"x".repeat(60)).unwrap();

        let out = BookListRenderer::default().render(&[book.snapshot()]).unwrap();

        let row = out.lines().nth(3).unwrap();
        assert!(row.contains(&"x".repeat(28)));
        assert!(!row.contains(&"x".repeat(29)));
    }

    #[test]
    fn empty_input_still_has_a_header() {
        let out = BookListRenderer::default().render(&[]).unwrap();

        assert_eq!(out.lines().count(), 3);
        assert!(out.starts_with(DEFAULT_TITLE));
        assert!(out.lines().next().unwrap().ends_with("Page.1"));
        assert_eq!(out.lines().nth(2), Some("-".repeat(table_width()).as_str()));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn foreign_snapshot_is_an_error() {
        let mut set = formkit_core::domain::FieldSet::new();
        set.create_field("Name", String::from("not a book"), true, false);

        assert!(BookListRenderer::default().render(&[set.snapshot()]).is_err());
    }
}
