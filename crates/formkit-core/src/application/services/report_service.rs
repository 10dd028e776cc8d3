//! Report rendering off the interactive thread.
//!
//! Models are snapshotted on the caller's thread; only the snapshots travel
//! to the worker. The live field sets never leave their owner.

use std::thread;

use tracing::{debug, info, instrument};

use crate::{
    application::{AppError, ports::ReportRenderer},
    domain::{Model, Snapshot},
    error::FormkitResult,
};

pub struct ReportService {
    renderer: Box<dyn ReportRenderer>,
}

impl ReportService {
    pub fn new(renderer: Box<dyn ReportRenderer>) -> Self {
        Self { renderer }
    }

    /// Snapshot `models` and render them on a worker thread.
    #[instrument(skip_all)]
    pub fn render<'m, M>(&self, models: impl IntoIterator<Item = &'m M>) -> FormkitResult<String>
    where
        M: Model + 'm,
    {
        let rows: Vec<Snapshot> = models.into_iter().map(Model::snapshot).collect();
        info!(rows = rows.len(), "Rendering report");
        self.render_snapshots(rows)
    }

    /// Render already-detached rows on a worker thread.
    pub fn render_snapshots(&self, rows: Vec<Snapshot>) -> FormkitResult<String> {
        let renderer = self.renderer.as_ref();

        let joined = thread::scope(|scope| scope.spawn(|| renderer.render(&rows)).join());

        match joined {
            Ok(rendered) => {
                debug!("Report worker finished");
                rendered
            }
            Err(_) => Err(AppError::RenderingFailed {
                reason: "report worker panicked".into(),
            }
            .into()),
        }
    }
}
