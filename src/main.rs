//! assetpipe CLI - front-end asset pipeline
//!
//! Usage: assetpipe [--dev] [--sync] [--json] <COMMAND>
//!
//! Commands:
//!   build   Clean, then build everything in order
//!   watch   Build, then rebuild on change
//!   libs    Build both library bundles

mod cli;
mod commands;

use anyhow::{Context, Result};
use assetpipe::presentation::{EventPrinter, OutputFormat};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() {
    // Parse CLI arguments early so we can configure logging/output.
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for events
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(match cli.verbose {
                0 => "warn",
                1 => "info",
                _ => "debug",
            })
        }))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let printer = EventPrinter::new(OutputFormat::from_json_flag(cli.json));
    let ctx = commands::load_context(cli.project_root.as_deref(), cli.config.as_deref(), cli.flags())?;

    match cli.command {
        Commands::Build => commands::build::cmd_build(&ctx, printer),
        Commands::Libs => commands::build::cmd_libs(&ctx, printer),
        Commands::Watch => commands::watch::cmd_watch(ctx, printer),
        other => {
            let task = other
                .single_task()
                .with_context(|| format!("{:?} is not a single task", other))?;
            commands::build::cmd_task(task, &ctx, printer)
        }
    }
}
