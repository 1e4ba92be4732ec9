//! Test environment builder for isolated assetpipe runs.
//!
//! Provides `TestEnv` - a temp project directory plus helpers to run the
//! assetpipe binary against it.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use tempfile::TempDir;

use super::fixtures::*;

/// Environment variables that would leak host configuration into a run
const SCRUBBED_ENV: &[&str] = &["ASSETPIPE_SRC", "ASSETPIPE_BUILD", "ASSETPIPE_PORT", "RUST_LOG"];

/// Result of running an assetpipe command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Check if command succeeded
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON events
    #[allow(dead_code)]
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l).unwrap_or_else(|e| panic!("not JSON: {l:?}: {e}"))
            })
            .collect()
    }
}

/// Isolated project directory.
pub struct TestEnv {
    /// Temporary directory for the project
    pub project_root: TempDir,
    /// Path to the assetpipe binary
    bin: PathBuf,
}

impl TestEnv {
    /// Create a new TestEnvBuilder
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Project with the fixture site and its libraries
    #[allow(dead_code)]
    pub fn site() -> Self {
        Self::builder().with_site().with_libraries().build()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Get path relative to the default build root
    #[allow(dead_code)]
    pub fn build_path(&self, relative: &str) -> PathBuf {
        self.project_path("build").join(relative)
    }

    /// Run assetpipe from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, &[])
    }

    /// Run assetpipe from the project root with extra env vars
    #[allow(dead_code)]
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, env_vars)
    }

    /// Run assetpipe from a specific directory with extra env vars
    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let output = self
            .command(cwd, args, env_vars)
            .output()
            .expect("Failed to execute assetpipe");
        output_to_result(output)
    }

    /// Start a long-running assetpipe (watch) with piped output
    #[allow(dead_code)]
    pub fn spawn(&self, args: &[&str], env_vars: &[(&str, &str)]) -> Child {
        self.command(self.project_root.path(), args, env_vars)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to start assetpipe")
    }

    fn command(&self, cwd: &Path, args: &[&str], env_vars: &[(&str, &str)]) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd).args(args);
        for key in SCRUBBED_ENV {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        cmd
    }

    /// Write a file to the project directory
    pub fn write_file(&self, relative_path: &str, content: impl AsRef<[u8]>) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Read a built file as text
    #[allow(dead_code)]
    pub fn read_built(&self, relative_path: &str) -> String {
        let full_path = self.build_path(relative_path);
        std::fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Failed to read built file {}: {}", relative_path, e))
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    files: Vec<(String, Vec<u8>)>,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Add a file, relative to the project root
    pub fn with_file(mut self, path: &str, content: impl AsRef<[u8]>) -> Self {
        self.files.push((path.to_string(), content.as_ref().to_vec()));
        self
    }

    /// Markup, styles, scripts and images under `src/`
    pub fn with_site(self) -> Self {
        self.with_file("src/index.html", INDEX_HTML)
            .with_file("src/pages/about.html", ABOUT_HTML)
            .with_file("src/css/imports.scss", IMPORTS_SCSS)
            .with_file("src/css/_base.scss", BASE_SCSS)
            .with_file("src/js/main.js", MAIN_JS)
            .with_file("src/images/logo.png", LOGO_PNG)
            .with_file("src/images/icons/star.svg", ICON_SVG)
    }

    /// Third-party libraries at their default locations
    pub fn with_libraries(self) -> Self {
        self.with_file("node_modules/normalize.css/normalize.css", NORMALIZE_CSS)
            .with_file("src/css/libs.scss", LIBS_SCSS)
            .with_file("node_modules/jquery/dist/jquery.min.js", JQUERY_JS)
    }

    /// Project config file
    #[allow(dead_code)]
    pub fn with_config(self, toml: &str) -> Self {
        self.with_file("assetpipe.toml", toml)
    }

    pub fn build(self) -> TestEnv {
        let project_root = tempfile::tempdir().expect("Failed to create temp project");
        for (path, content) in &self.files {
            let full = project_root.path().join(path);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create directories");
            }
            std::fs::write(&full, content).expect("Failed to write fixture");
        }
        TestEnv {
            project_root,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_assetpipe")),
        }
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}
