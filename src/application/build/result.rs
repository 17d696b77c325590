//! Build Result

use std::path::PathBuf;

use crate::domain::value_objects::{ContentHash, StrategyKind};

/// What a successful build produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    /// Where the unit was written (as configured, not canonicalized)
    pub output: PathBuf,
    pub bytes: usize,
    pub lines: usize,
    pub modules: usize,
    pub strategy: StrategyKind,
    pub hash: ContentHash,
    /// Module names in emission order
    pub order: Vec<String>,
}

impl BuildResult {
    /// Size in kibibytes, as reported to users
    pub fn kilobytes(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }
}
