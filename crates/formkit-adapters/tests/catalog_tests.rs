//! End-to-end tests: books edited in a catalog, rendered through the
//! report service.

use formkit_adapters::{Book, BookCatalog, BookListRenderer};
use formkit_core::prelude::*;

fn save() -> Command<Book> {
    Command::new("save", |book: &mut Book| {
        book.clean();
        Ok(())
    })
    .guarded_by(commit_guard)
}

#[test]
fn test_edit_and_commit_round_trip() {
    let mut catalog = BookCatalog::with_samples();
    let book = catalog.get_mut(5).unwrap();
    let mut cmd = save();
    assert!(!cmd.can_execute(book));

    book.assign("Price", "1,050").unwrap();
    assert!(cmd.can_execute(book));

    book.assign("ReviewPoint", "7").unwrap();
    assert!(!cmd.can_execute(book), "field error blocks commit");

    book.assign("ReviewPoint", "5").unwrap();
    cmd.execute(book).unwrap();

    let book = catalog.get(5).unwrap();
    assert_eq!(book.price(), Some(1050));
    assert_eq!(book.review_point(), Some(5));
    assert!(!book.is_changed());
}

#[test]
fn test_discarded_edit_restores_stored_values() {
    let mut catalog = BookCatalog::with_samples();
    let before = catalog.get(8).unwrap().record();

    let book = catalog.get_mut(8).unwrap();
    book.assign("Title", "Majo 2").unwrap();
    book.assign("Category", "novel").unwrap();
    book.reset();

    assert_eq!(catalog.get(8).unwrap().record(), before);
}

#[test]
fn test_added_book_appears_in_report() {
    let mut catalog = BookCatalog::with_samples();
    let mut book = Book::new();
    for (name, text) in [
        ("Title", "Sanshiro"),
        ("Author", "Natsume Soseki"),
        ("Publisher", "Shinchosha"),
        ("Category", "Novel"),
        ("Price", "430"),
        ("PurchaseDate", "2015/01/05"),
        ("ReviewPoint", "3"),
    ] {
        book.assign(name, text).unwrap();
    }
    let id = catalog.add(book).unwrap();

    let service = ReportService::new(Box::new(BookListRenderer::new("Library", 23)));
    let report = service.render(&catalog).unwrap();

    let row = report.lines().find(|l| l.contains("Sanshiro")).unwrap();
    assert!(row.trim_start().starts_with(&id.to_string()));
    assert!(row.contains("2015/01/05"));
    assert!(row.ends_with("★★★"));
    assert_eq!(report.lines().filter(|l| l.ends_with("Page.1")).count(), 1);
}

#[test]
fn test_commit_of_missing_book() {
    let mut catalog = BookCatalog::new();
    let err = catalog.commit(1).unwrap_err();
    assert_eq!(
        err,
        FormkitError::Application(AppError::RecordNotFound { id: 1 })
    );
}

#[test]
fn test_report_snapshots_reflect_uncommitted_edits() {
    let mut catalog = BookCatalog::with_samples();
    catalog.get_mut(1).unwrap().assign("Title", "Dogura Magura").unwrap();

    let service = ReportService::new(Box::new(BookListRenderer::default()));
    let report = service.render_snapshots(catalog.snapshots()).unwrap();

    assert!(report.contains("Dogura Magura"));
    assert!(!report.contains("Dogra Magra"));
}
