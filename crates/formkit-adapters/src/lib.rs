//! Adapters and sample consumers for formkit.
//!
//! This crate implements the ports defined in
//! `formkit_core::application::ports` and provides a concrete model built
//! from fields: a [`Book`] kept in an in-memory [`BookCatalog`].

pub mod book;
pub mod catalog;
pub mod filters;
pub mod report;

// Re-export commonly used adapters
pub use book::{Book, BookCategory, BookRecord};
pub use catalog::BookCatalog;
pub use report::BookListRenderer;
