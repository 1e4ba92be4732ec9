use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use assetpipe::application::{run_parallel, PipelineEvent, TaskContext};
use assetpipe::config::ServerConfig;
use assetpipe::domain::value_objects::TaskName;
use assetpipe::infrastructure::server::{DevServer, LiveReload};
use assetpipe::presentation::EventPrinter;
use assetpipe::watcher::{watch, WatchOptions};

/// `watch`: build every output concurrently, then rebuild on change.
///
/// With `--sync` the build root is also served with live reload until
/// Ctrl+C.
pub fn cmd_watch(ctx: TaskContext, printer: EventPrinter) -> Result<()> {
    let on_event = |e: PipelineEvent| printer.print(&e);

    let reload = LiveReload::new();
    let ctx = ctx.with_reload(reload.clone());

    let summary = run_parallel(&TaskName::WATCH_PARALLEL, &ctx, &on_event);
    if !summary.is_success() {
        // Keep watching so the next save can fix it
        tracing::warn!(
            failed = summary.failures.len(),
            total = summary.total,
            "initial build had failures"
        );
    }

    let _server = if ctx.flags().sync {
        let build_root = ctx.build_root();
        std::fs::create_dir_all(&build_root)
            .with_context(|| format!("cannot create {}", build_root.display()))?;

        let addr = server_addr(&ctx.config().server)?;
        let handle = DevServer::new(build_root, addr, reload).spawn()?;
        on_event(PipelineEvent::ServerStarted { url: handle.url() });
        Some(handle)
    } else {
        None
    };

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("error setting Ctrl+C handler")?;

    watch(WatchOptions::new(ctx), running, on_event)?;
    Ok(())
}

fn server_addr(server: &ServerConfig) -> Result<SocketAddr> {
    (server.host.as_str(), server.port)
        .to_socket_addrs()
        .with_context(|| format!("invalid server address {}:{}", server.host, server.port))?
        .next()
        .with_context(|| format!("no address for {}:{}", server.host, server.port))
}
