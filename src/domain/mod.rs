//! Domain Layer
//!
//! Plain value types shared by tasks, the watcher and the CLI.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (BuildMode, TaskName, ContentHash)
//! - `ports/` - Interface definitions for infrastructure

pub mod ports;
pub mod value_objects;
