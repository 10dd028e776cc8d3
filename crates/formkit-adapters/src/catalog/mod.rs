//! Book storage.

pub mod memory;

pub use memory::BookCatalog;
