//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod build_mode;
mod hash;
mod task_name;

pub use build_mode::{BuildFlags, BuildMode};
pub use hash::ContentHash;
pub use task_name::TaskName;
