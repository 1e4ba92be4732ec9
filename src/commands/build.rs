use anyhow::Result;
use assetpipe::application::{run_parallel, run_reported, run_series, PipelineEvent, RunSummary, TaskContext};
use assetpipe::domain::value_objects::TaskName;
use assetpipe::presentation::{EventPrinter, OutputFormat};

/// `build`: clean, then every output in order; stops at the first failure
pub fn cmd_build(ctx: &TaskContext, printer: EventPrinter) -> Result<()> {
    let summary = run_series(&TaskName::BUILD_SERIES, ctx, &|e: PipelineEvent| {
        printer.print(&e)
    });
    finish("Build", summary, printer)
}

/// `libs`: both library bundles concurrently
pub fn cmd_libs(ctx: &TaskContext, printer: EventPrinter) -> Result<()> {
    let summary = run_parallel(&TaskName::LIBS_PARALLEL, ctx, &|e: PipelineEvent| {
        printer.print(&e)
    });
    finish("Libs", summary, printer)
}

/// A single task by name
pub fn cmd_task(task: TaskName, ctx: &TaskContext, printer: EventPrinter) -> Result<()> {
    run_reported(task, ctx, &|e: PipelineEvent| printer.print(&e))
        .map_err(|failure| anyhow::anyhow!("'{}' failed: {}", failure.task, failure.message))?;
    Ok(())
}

fn finish(label: &str, summary: RunSummary, printer: EventPrinter) -> Result<()> {
    if printer.format() == OutputFormat::Text && summary.is_success() {
        println!(
            "{} complete: {} tasks, {} files written",
            label,
            summary.reports.len(),
            summary.files_written()
        );
    }
    summary.into_result()?;
    Ok(())
}
