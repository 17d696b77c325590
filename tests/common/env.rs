//! Isolated project directory for Monolink testing.
//!
//! Provides `TestProject` - a temp directory holding a manifest and module
//! sources, plus helpers to run the `monolink` binary inside it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

use super::fixtures;

/// Result of running the monolink CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Temp project directory with helpers
pub struct TestProject {
    pub root: TempDir,
    bin: PathBuf,
}

impl TestProject {
    /// Empty project
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("Failed to create temp dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_monolink")),
        }
    }

    /// Project with the three-module kit: Icons (data), Theme, Button
    pub fn kit(strategy: &str) -> Self {
        let project = Self::new();
        project.write("bundle.toml", &fixtures::kit_manifest(strategy));
        project.write("src/Icons.lua", fixtures::ICONS);
        project.write("src/Theme.lua", fixtures::THEME);
        project.write("src/Button.lua", fixtures::BUTTON);
        project.write("init.lua", fixtures::INIT);
        project
    }

    /// Get path relative to the project root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Write a file, creating parent directories
    pub fn write(&self, relative: &str, content: &str) {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Run monolink from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.root.path(), args)
    }

    /// Run monolink from a specific directory
    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        let output = Command::new(&self.bin)
            .current_dir(cwd)
            .args(args)
            .env_remove("MONOLINK_LOG")
            .output()
            .expect("Failed to execute monolink");
        to_result(output)
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
