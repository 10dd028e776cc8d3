//! Driven ports, implemented in `formkit-adapters`.

use crate::domain::Snapshot;
use crate::error::FormkitResult;

/// Port for turning model snapshots into a printable report.
///
/// Runs off the interactive thread, so implementations must be
/// `Send + Sync` and may only read the snapshots they are given.
///
/// Implemented by:
/// - `formkit_adapters::report::BookListRenderer` (paged text)
#[cfg_attr(test, mockall::automock)]
pub trait ReportRenderer: Send + Sync {
    /// Render one row per snapshot, in order.
    fn render(&self, rows: &[Snapshot]) -> FormkitResult<String>;
}
