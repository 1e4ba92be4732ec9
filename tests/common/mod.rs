//! Common test utilities for assetpipe CLI tests.
//!
//! This module provides:
//! - `TestEnv`: isolated project directory plus helpers to run the binary
//! - Assertion macros: `assert_built!`, `assert_not_built!`
//! - Fixtures: a small site and its third-party libraries

pub mod assertions;
pub mod env;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
pub use env::*;
#[allow(unused_imports)]
pub use fixtures::*;
