//! Application layer for formkit.
//!
//! This layer contains:
//! - **Command**: named actions gated on a model's aggregate state
//! - **Ports**: traits implemented by adapters (report rendering)
//! - **Services**: orchestration across ports (`ReportService`)
//! - **Errors**: application-specific error types
//!
//! Field and set semantics live in `crate::domain`; this layer only
//! coordinates them and is where tracing spans start.

pub mod command;
pub mod error;
pub mod ports;
pub mod services;

pub use command::{Command, commit_guard};
pub use error::AppError;
pub use ports::ReportRenderer;
pub use services::ReportService;

#[cfg(test)]
pub use ports::MockReportRenderer;
