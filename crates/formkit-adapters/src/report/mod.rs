//! Report renderers.

pub mod text;

pub use text::BookListRenderer;
