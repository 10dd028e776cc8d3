// ============================================================================
//  DOMAIN LAYER
// ============================================================================

//! Fields, field sets and validation.
//!
//! Pure, synchronous state machines: no I/O, no logging, nothing beyond std,
//! `thiserror` and `serde`. Fields and sets are single-threaded; the only
//! value that crosses threads is a [`Snapshot`].

pub mod error;
pub mod field;
pub mod model;
pub mod set;
pub mod validation;

pub use error::{ErrorCategory, FieldError};
pub use field::{
    Direction, Equality, Field, FieldBase, FieldSignal, FieldValue, IoFilter, Payload, Property,
    Tag, ValidationChecked, Validator, ValueChanged, ValueChanging, WriteOutcome,
};
pub use model::Model;
pub use set::{FieldFilter, FieldKey, FieldMut, FieldSet, FilterKind, SetEvent, SetProperty, Snapshot};
pub use validation::ValidationResult;
