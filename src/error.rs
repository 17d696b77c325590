//! Error types for monolink
//!
//! Every variant is fatal: the build aborts before anything is written.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bundler operations
pub type BundleResult<T> = Result<T, BundleError>;

/// Main error type for bundler operations
#[derive(Error, Debug)]
pub enum BundleError {
    /// A registered source path is missing or unreadable
    #[error("cannot read module '{module}' from {path}: {message}")]
    ModuleRead {
        module: String,
        path: PathBuf,
        message: String,
    },

    /// The module does not have the shape the transformer expects
    #[error("module '{module}' cannot be transformed: {reason}")]
    TransformationAmbiguity { module: String, reason: String },

    /// Two owners bind the same top-level name in the combined unit
    #[error("symbol '{symbol}' is bound by both '{first}' and '{second}'")]
    SymbolCollision {
        symbol: String,
        first: String,
        second: String,
    },

    /// A dependency is not defined before the module that needs it
    #[error("module '{module}' depends on '{dependency}', which is not registered before it")]
    OrderingViolation { module: String, dependency: String },

    /// A dependency names a module missing from the registry
    #[error("module '{module}' depends on unknown module '{dependency}'")]
    UnknownDependency { module: String, dependency: String },

    /// The registry lists the same module twice
    #[error("module '{name}' is registered more than once")]
    DuplicateModule { name: String },

    /// A registry entry combines options that cannot work together
    #[error("module '{module}' is misconfigured: {reason}")]
    InvalidModule { module: String, reason: String },

    /// A name used as a Lua binding is not a valid identifier
    #[error("{context} '{name}' is not a valid Lua identifier")]
    InvalidIdentifier { context: String, name: String },

    /// The public API still requires something that is not bundled
    #[error("{owner} requires '{target}', which is not a bundled module")]
    UnresolvedRequire { owner: String, target: String },

    /// No manifest in the working directory
    #[error("manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Manifest failed to parse
    #[error("invalid manifest {file}: {message}")]
    InvalidManifest { file: PathBuf, message: String },

    /// The combined unit could not be materialized
    #[error("failed to write {path}: {message}")]
    OutputWrite { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BundleError {
    /// Name of the module the error is about, if any
    pub fn module(&self) -> Option<&str> {
        match self {
            BundleError::ModuleRead { module, .. }
            | BundleError::TransformationAmbiguity { module, .. }
            | BundleError::OrderingViolation { module, .. }
            | BundleError::UnknownDependency { module, .. }
            | BundleError::InvalidModule { module, .. } => Some(module),
            BundleError::SymbolCollision { second, .. } => Some(second),
            BundleError::DuplicateModule { name } => Some(name),
            _ => None,
        }
    }
}
