//! `formkit report`

use std::fs;

use formkit_adapters::BookListRenderer;
use formkit_core::application::ReportService;
use tracing::{info, instrument};

use crate::{
    cli::ReportArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: ReportArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let catalog = super::open_catalog();
    let renderer = renderer_for(&args, &config);
    info!(title = renderer.title(), page_lines = renderer.page_lines(), "Report requested");

    let text = ReportService::new(Box::new(renderer)).render(&catalog)?;

    match args.output {
        Some(path) => {
            fs::write(&path, &text)
                .with_cli_context(|| format!("writing report to '{}'", path.display()))?;
            output.success(&format!("Report written to {}", path.display()))?;
        }
        None => output.data(&text)?,
    }
    Ok(())
}

fn renderer_for(args: &ReportArgs, config: &AppConfig) -> BookListRenderer {
    BookListRenderer::new(
        args.title.clone().unwrap_or_else(|| config.report.title.clone()),
        args.page_lines.unwrap_or(config.report.page_lines),
    )
}
