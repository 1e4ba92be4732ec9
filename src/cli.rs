//! CLI Argument Parsing
//!
//! Global flags (`--dev`, `--sync`, `--json`, `-v`, `-C`, `--config`) are
//! accepted before or after the subcommand.

use std::path::PathBuf;

use assetpipe::domain::value_objects::{BuildFlags, TaskName};
use clap::{Parser, Subcommand};

/// assetpipe - front-end asset pipeline
#[derive(Parser, Debug)]
#[command(name = "assetpipe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Development build: source maps, no minification
    #[arg(long, global = true)]
    pub dev: bool,

    /// Serve the build root with live reload (watch mode)
    #[arg(long, global = true)]
    pub sync: bool,

    /// Print events as NDJSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project root (default: nearest directory with assetpipe.toml)
    #[arg(short = 'C', long = "project-root", value_name = "DIR", global = true)]
    pub project_root: Option<PathBuf>,

    /// Config file (default: <root>/assetpipe.toml)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn flags(&self) -> BuildFlags {
        BuildFlags::new(self.dev, self.sync)
    }
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Clean, then build every asset class and both library bundles
    Build,

    /// Build, then rebuild on change (and serve with --sync)
    Watch,

    /// Build both library bundles concurrently
    Libs,

    /// Copy markup
    Html,

    /// Copy images, compressing PNGs in production
    Images,

    /// Compile the stylesheet bundle
    Styles,

    /// Concatenate the script bundle
    Scripts,

    /// Concatenate script libraries
    ScriptsLibs,

    /// Compile stylesheet libraries
    StylesLibs,

    /// Empty the build directory
    Clean,
}

impl Commands {
    /// The single task a command runs, if it is not a composition
    pub fn single_task(self) -> Option<TaskName> {
        match self {
            Commands::Build | Commands::Watch | Commands::Libs => None,
            Commands::Html => Some(TaskName::Html),
            Commands::Images => Some(TaskName::Images),
            Commands::Styles => Some(TaskName::Styles),
            Commands::Scripts => Some(TaskName::Scripts),
            Commands::ScriptsLibs => Some(TaskName::ScriptsLibs),
            Commands::StylesLibs => Some(TaskName::StylesLibs),
            Commands::Clean => Some(TaskName::Clean),
        }
    }
}
