//! Task name value object - the exported task surface

use serde::{Deserialize, Serialize};

/// A single file-transformation task
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum TaskName {
    /// Remove everything under the build root
    Clean,
    /// Copy markup
    Html,
    /// Compile the stylesheet entry
    Styles,
    /// Bundle application scripts
    Scripts,
    /// Copy and optimize images
    Images,
    /// Concatenate third-party scripts
    ScriptsLibs,
    /// Compile and concatenate third-party stylesheets
    StylesLibs,
}

impl TaskName {
    /// Full build order: clean first, then every output
    pub const BUILD_SERIES: [TaskName; 7] = [
        TaskName::Clean,
        TaskName::Html,
        TaskName::Styles,
        TaskName::Scripts,
        TaskName::Images,
        TaskName::ScriptsLibs,
        TaskName::StylesLibs,
    ];

    /// Initial run of watch mode
    pub const WATCH_PARALLEL: [TaskName; 6] = [
        TaskName::Html,
        TaskName::Styles,
        TaskName::Scripts,
        TaskName::Images,
        TaskName::ScriptsLibs,
        TaskName::StylesLibs,
    ];

    /// Both library tasks
    pub const LIBS_PARALLEL: [TaskName; 2] = [TaskName::StylesLibs, TaskName::ScriptsLibs];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskName::Clean => "clean",
            TaskName::Html => "html",
            TaskName::Styles => "styles",
            TaskName::Scripts => "scripts",
            TaskName::Images => "images",
            TaskName::ScriptsLibs => "scripts-libs",
            TaskName::StylesLibs => "styles-libs",
        }
    }
}

impl std::fmt::Display for TaskName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
