//! Application services - orchestrate use cases across ports.

pub mod report_service;

pub use report_service::ReportService;
