//! Infrastructure Layer
//!
//! Concrete implementations of domain ports and the third-party
//! transforms. This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - local file system, source globbing
//! - `transform/` - SCSS, minification, PNG compression, source maps
//! - `server/` - live-reload dev server

pub mod fs;
pub mod server;
pub mod transform;

// Re-export for convenience
pub use fs::{LocalFs, SourceGlob};
pub use server::{DevServer, LiveReload};
