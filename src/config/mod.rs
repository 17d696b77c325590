//! Manifest configuration
//!
//! A build is fully described by `bundle.toml` in the working directory.
//! There are no environment overrides and no user-level config: the same
//! manifest and sources always produce the same unit.

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{discover, load_with_warnings, parse_with_warnings, MANIFEST_FILE};
pub use types::{BundleConfig, BundleSection, EnvironmentEntry, LinkerConfig, ModuleEntry};
