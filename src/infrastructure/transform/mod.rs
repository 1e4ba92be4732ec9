//! Asset transforms
//!
//! Thin wrappers over the third-party compilers and optimizers. Each takes
//! bytes or text in and returns the transformed output, attributing
//! failures to the file being processed.

mod css;
mod image;
mod minify;
mod scss;
mod sourcemap;

pub use css::{process_css, CssOptions, CssOutput, PREFIX_BROWSERS};
pub use image::{optimize_png, optimize_svg};
pub use minify::minify_js;
pub use scss::{compile_scss, compile_scss_str};
pub use sourcemap::{encode_vlq, SourceMap, SourceMapBuilder};
