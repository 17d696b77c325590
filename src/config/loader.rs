//! Manifest discovery and loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ConfigWarning;
use crate::error::{BundleError, BundleResult};

use super::types::BundleConfig;

/// Manifest file name looked up in the working directory
pub const MANIFEST_FILE: &str = "bundle.toml";

/// Path of the manifest in `dir`, if there is one.
pub fn discover(dir: &Path) -> BundleResult<PathBuf> {
    let path = dir.join(MANIFEST_FILE);
    if path.is_file() {
        Ok(path)
    } else {
        Err(BundleError::ManifestNotFound { path })
    }
}

/// Load the manifest and collect non-fatal warnings (unknown keys).
pub fn load_with_warnings(path: &Path) -> BundleResult<(BundleConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => BundleError::ManifestNotFound {
            path: path.to_path_buf(),
        },
        _ => BundleError::Io(e),
    })?;
    parse_with_warnings(&content, path)
}

/// Parse manifest text. `path` is only used in messages.
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> BundleResult<(BundleConfig, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: BundleConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| BundleError::InvalidManifest {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((config, warnings))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.trim_start().starts_with(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "bundle",
        "name",
        "version",
        "output",
        "strategy",
        "header",
        "api",
        "linker",
        "registry",
        "call",
        "environment",
        "value",
        "modules",
        "path",
        "symbol",
        "kind",
        "depends",
        "initialize",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let b_bytes = b.as_bytes();
    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a.as_bytes().iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_bytes.len()]
}
