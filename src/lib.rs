//! Monolink - single-file bundler for Lua/Luau module trees
//!
//! Monolink takes an ordered registry of Lua modules and emits one
//! self-contained chunk that a host can load in a single evaluation. Each
//! module is transformed, wrapped by the selected scope strategy and wired to
//! its dependencies in a second phase, after every module is defined.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{BuildResult, BuildUseCase, BundlePipeline};
pub use config::{BundleConfig, ConfigWarning};
pub use domain::entities::{CombinedUnit, ModuleDescriptor, ModuleKind, ModuleRegistry};
pub use domain::value_objects::{CallStyle, StrategyKind};
pub use error::{BundleError, BundleResult};
pub use infrastructure::{LocalFs, MemoryFs};
