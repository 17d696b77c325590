//! Build Use Case
//!
//! Orchestrates one build:
//! 1. Run the pipeline in memory
//! 2. Render the unit
//! 3. Materialize it with a single atomic write
//!
//! Any failure before step 3 leaves the previous artifact in place.

use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use crate::application::pipeline::BundlePipeline;
use crate::config::BundleConfig;
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::ContentHash;
use crate::error::{BundleError, BundleResult};

use super::result::BuildResult;

pub struct BuildUseCase<FS: FileSystem> {
    file_system: FS,
}

impl<FS: FileSystem> BuildUseCase<FS> {
    pub fn new(file_system: FS) -> Self {
        Self { file_system }
    }

    /// Build the bundle described by `config`; relative paths resolve
    /// against `base_dir`.
    pub fn execute(
        &self,
        base_dir: &Path,
        config: &BundleConfig,
        build_date: NaiveDate,
    ) -> BundleResult<BuildResult> {
        let unit = BundlePipeline::new(&self.file_system, base_dir, config)
            .with_build_date(build_date)
            .build()?;
        let text = unit.render();

        let output = config.output_path();
        let target = base_dir.join(&output);
        self.file_system
            .write_atomic(&target, &text)
            .map_err(|e| BundleError::OutputWrite {
                path: output.clone(),
                message: e.to_string(),
            })?;

        let result = BuildResult {
            output,
            bytes: text.len(),
            lines: text.lines().count(),
            modules: unit.segments.len(),
            strategy: config.bundle.strategy,
            hash: ContentHash::from_content(&text),
            order: unit
                .segment_order()
                .into_iter()
                .map(str::to_string)
                .collect(),
        };
        info!(
            output = %result.output.display(),
            bytes = result.bytes,
            lines = result.lines,
            "wrote combined unit"
        );
        Ok(result)
    }
}
