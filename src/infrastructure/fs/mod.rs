//! File System Implementations
//!
//! Concrete implementations of the FileSystem port, plus source globbing.

mod local;
mod sources;

pub use local::LocalFs;
pub use sources::{SourceFile, SourceGlob};
