//! Output Rendering
//!
//! Every command reports through [`PipelineEvent`]s. In text mode each event
//! becomes one timestamped line; in JSON mode one NDJSON object per line.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::application::PipelineEvent;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// NDJSON for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    progress: &'static str,
    arrow: &'static str,
    watch: &'static str,
    server: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            progress: "●",
            arrow: "↳",
            watch: "⟳",
            server: "📡",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            progress: "[..]",
            arrow: "->",
            watch: "[~]",
            server: "[srv]",
        }
    }
}

/// Render one event as a text line (newline included)
pub fn render_event(timestamp: &str, event: &PipelineEvent, unicode: bool) -> String {
    let icons = if unicode {
        Icons::unicode()
    } else {
        Icons::ascii()
    };
    let prefix = format!("[{}]", timestamp);

    match event {
        PipelineEvent::TaskStarted { task } => {
            format!("{} {} Starting '{}'\n", prefix, icons.progress, task)
        }
        PipelineEvent::TaskComplete {
            task,
            written,
            bytes,
            duration_ms,
        } => format!(
            "{} {} Finished '{}' after {} ms ({} files, {})\n",
            prefix,
            icons.check,
            task,
            duration_ms,
            written,
            format_bytes(*bytes)
        ),
        PipelineEvent::TaskFailed { task, message } => {
            format!("{} {} '{}' failed: {}\n", prefix, icons.cross, task, message)
        }
        PipelineEvent::WatchStarted { source } => {
            format!("{} {} Watching: {}\n", prefix, icons.watch, source)
        }
        PipelineEvent::FileChanged { path, task } => {
            format!("{} {} Changed: {} ({})\n", prefix, icons.arrow, path, task)
        }
        PipelineEvent::ServerStarted { url } => {
            format!("{} {} Serving build at {}\n", prefix, icons.server, url)
        }
        PipelineEvent::Shutdown => format!("\n{} {} Watch stopped.\n", prefix, icons.watch),
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Wall-clock time of day, UTC
fn timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 86_400;
            let h = secs / 3600;
            let m = (secs % 3600) / 60;
            let s = secs % 60;
            format!("{:02}:{:02}:{:02}", h, m, s)
        })
        .unwrap_or_else(|_| "00:00:00".to_string())
}

/// Prints events to stdout, failures to stderr in text mode
#[derive(Debug, Clone, Copy)]
pub struct EventPrinter {
    format: OutputFormat,
    unicode: bool,
}

impl EventPrinter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            unicode: !cfg!(windows),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn print(&self, event: &PipelineEvent) {
        match self.format {
            OutputFormat::Json => println!("{}", event.to_json()),
            OutputFormat::Text => {
                let rendered = render_event(&timestamp(), event, self.unicode);
                match event {
                    PipelineEvent::TaskFailed { .. } => eprint!("{rendered}"),
                    _ => print!("{rendered}"),
                }
            }
        }
    }
}
