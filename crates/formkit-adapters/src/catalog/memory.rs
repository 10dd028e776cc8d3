//! In-memory book catalog.

use formkit_core::{
    application::AppError,
    domain::{Model, Snapshot},
    error::FormkitResult,
};
use tracing::{debug, info, instrument, warn};

use crate::book::Book;

/// An ordered, in-memory list of books owning identifier allocation.
#[derive(Debug, Default)]
pub struct BookCatalog {
    books: Vec<Book>,
    last_id: u32,
}

impl BookCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the bundled sample books.
    pub fn with_samples() -> Self {
        let books = Book::samples();
        let last_id = books.iter().map(Book::id).max().unwrap_or(0);
        Self { books, last_id }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    pub fn get(&self, id: u32) -> FormkitResult<&Book> {
        self.books
            .iter()
            .find(|b| b.id() == id)
            .ok_or_else(|| AppError::RecordNotFound { id }.into())
    }

    pub fn get_mut(&mut self, id: u32) -> FormkitResult<&mut Book> {
        self.books
            .iter_mut()
            .find(|b| b.id() == id)
            .ok_or_else(|| AppError::RecordNotFound { id }.into())
    }

    /// Validate a new book, assign it the next identifier and store it.
    #[instrument(skip_all)]
    pub fn add(&mut self, mut book: Book) -> FormkitResult<u32> {
        ensure_valid(&mut book)?;

        self.last_id += 1;
        let id = self.last_id;
        book.init_id(id);
        book.clean();
        self.books.push(book);

        info!(id, "Book added");
        Ok(id)
    }

    /// Validate the edits on a stored book and mark them persisted.
    #[instrument(skip(self))]
    pub fn commit(&mut self, id: u32) -> FormkitResult<()> {
        let book = self.get_mut(id)?;
        if !book.is_changed() {
            debug!("Nothing to commit");
            return Ok(());
        }
        ensure_valid(book)?;
        book.clean();
        info!("Book updated");
        Ok(())
    }

    /// Take a book out of the catalog. The returned book no longer has an
    /// identifier.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: u32) -> FormkitResult<Book> {
        let index = self
            .books
            .iter()
            .position(|b| b.id() == id)
            .ok_or(AppError::RecordNotFound { id })?;

        let mut book = self.books.remove(index);
        book.init_id(0);
        info!("Book removed");
        Ok(book)
    }

    /// Detached copies of every book, for off-thread rendering.
    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.books.iter().map(Model::snapshot).collect()
    }
}

impl<'a> IntoIterator for &'a BookCatalog {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.books.iter()
    }
}

fn ensure_valid(book: &mut Book) -> FormkitResult<()> {
    if book.validation_check() {
        return Ok(());
    }
    let failed: Vec<&str> = book.fields().errors().map(|f| f.name()).collect();
    warn!(fields = ?failed, "Validation failed");
    Err(AppError::ValidationFailed(failed.join(", ")).into())
}
