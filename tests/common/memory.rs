//! In-memory builds through the library pipeline.

use std::path::Path;

use chrono::NaiveDate;

use monolink::config::{parse_with_warnings, MANIFEST_FILE};
use monolink::{BundlePipeline, BundleResult, CombinedUnit, MemoryFs};

/// Fixed date used for every in-memory build
pub fn build_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
}

/// Build `manifest` against `files`, given as paths relative to the project.
pub fn build_in_memory(manifest: &str, files: &[(&str, &str)]) -> BundleResult<CombinedUnit> {
    let (config, _) = parse_with_warnings(manifest, Path::new(MANIFEST_FILE))?;
    let fs = MemoryFs::new();
    for (path, content) in files {
        fs.insert(Path::new("/project").join(path), *content);
    }
    BundlePipeline::new(&fs, "/project", &config)
        .with_build_date(build_date())
        .build()
}

/// Manifest with `name = "Kit"` and one `[[modules]]` entry per line of
/// `modules`, each given as raw TOML body text.
pub fn manifest(strategy: &str, modules: &[&str]) -> String {
    let mut out = format!("[bundle]\nname = \"Kit\"\nstrategy = \"{strategy}\"\n");
    for module in modules {
        out.push_str("\n[[modules]]\n");
        out.push_str(module);
        out.push('\n');
    }
    out
}
