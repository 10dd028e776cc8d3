//! formkit core - observable, validated form fields
//!
//! This crate provides the field framework used to build data-entry
//! models, plus a thin application layer on top of it.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           formkit-cli (CLI)             │
//! │     list / edit / report commands       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Layer                │
//! │   (Command, ReportService)              │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │          (ReportRenderer)               │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   formkit-adapters (Book, BookCatalog,  │
//! │      text filters, list renderer)       │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Domain Layer (Pure Logic)         │
//! │  (Field, FieldBase, FieldSet, Snapshot) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use formkit_core::prelude::*;
//!
//! let mut set = FieldSet::new();
//! let price = set.create_field_with("Price", None::<i64>, |f| {
//!     f.create_validator(|v| v.is_none_or(|n| n >= 0), "invalid price");
//! });
//!
//! set.get_mut(price).unwrap().set_value(Some(-5)).unwrap();
//! assert!(set.has_error());
//! assert_eq!(set.get(price).unwrap().value(), None);
//!
//! set.get_mut(price).unwrap().set_value(Some(10)).unwrap();
//! assert!(!set.has_error());
//! assert!(set.is_changed());
//! ```

pub mod application;
pub mod domain;
pub mod error;

pub mod prelude {
    pub use crate::application::{AppError, Command, ReportRenderer, ReportService, commit_guard};
    pub use crate::domain::{
        Direction, Field, FieldBase, FieldError, FieldKey, FieldSet, FilterKind, Model, Payload,
        Property, SetEvent, SetProperty, Snapshot, ValidationResult, WriteOutcome,
    };
    pub use crate::error::{FormkitError, FormkitResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
