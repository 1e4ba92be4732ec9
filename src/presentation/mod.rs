//! Presentation Layer
//!
//! Renders pipeline events for the terminal:
//! - `output` - human-readable lines or NDJSON

pub mod output;

pub use output::{render_event, EventPrinter, OutputFormat};
