//! Manifest type definitions (`bundle.toml`)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::{ModuleDescriptor, ModuleKind, ModuleRegistry};
use crate::domain::services::{EnvironmentHandle, Linker, DEFAULT_TABLE};
use crate::domain::value_objects::{CallStyle, ConfigWarning, Identifier, StrategyKind};
use crate::error::BundleResult;

use super::loader;

/// `[bundle]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleSection {
    /// Aggregate root symbol; also names the default output file
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,

    /// Output path, relative to the manifest directory
    #[serde(default)]
    pub output: Option<PathBuf>,

    #[serde(default)]
    pub strategy: StrategyKind,

    /// Header template file; the built-in header is used when absent
    #[serde(default)]
    pub header: Option<PathBuf>,

    /// Public API template file
    #[serde(default)]
    pub api: Option<PathBuf>,
}

fn default_version() -> String {
    "0.0.0".to_string()
}

/// `[linker]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkerConfig {
    /// Name of the dependency-map table
    #[serde(default = "default_registry_table")]
    pub registry: String,

    #[serde(default)]
    pub call: CallStyle,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            registry: default_registry_table(),
            call: CallStyle::default(),
        }
    }
}

fn default_registry_table() -> String {
    DEFAULT_TABLE.to_string()
}

/// One `[[environment]]` entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvironmentEntry {
    pub name: String,
    /// Lua expression, e.g. `game:GetService("Players")`
    pub value: String,
}

/// One `[[modules]]` entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleEntry {
    pub name: String,
    pub path: PathBuf,

    /// Container name, when it differs from `name`
    #[serde(default)]
    pub symbol: Option<String>,

    #[serde(default)]
    pub kind: ModuleKind,

    #[serde(default)]
    pub depends: Vec<String>,

    #[serde(default = "default_true")]
    pub initialize: bool,
}

fn default_true() -> bool {
    true
}

impl ModuleEntry {
    /// Validated descriptor at registry position `order`
    pub fn descriptor(&self, order: usize) -> BundleResult<ModuleDescriptor> {
        let name = Identifier::parse(&self.name, "module name")?;
        let symbol = match &self.symbol {
            Some(symbol) => Identifier::parse(symbol, "exported symbol")?,
            None => name.clone(),
        };
        let depends = self
            .depends
            .iter()
            .map(|d| Identifier::parse(d, "dependency"))
            .collect::<BundleResult<Vec<_>>>()?;

        Ok(ModuleDescriptor::new(order, name, &self.path)
            .with_symbol(symbol)
            .with_kind(self.kind)
            .with_depends(depends)
            .with_initialize(self.initialize))
    }
}

/// Parsed `bundle.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    pub bundle: BundleSection,

    #[serde(default)]
    pub linker: LinkerConfig,

    #[serde(default)]
    pub environment: Vec<EnvironmentEntry>,

    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
}

impl BundleConfig {
    /// Load a manifest, discarding warnings
    pub fn load(path: &Path) -> BundleResult<Self> {
        Ok(loader::load_with_warnings(path)?.0)
    }

    /// Load a manifest and collect unknown-key warnings
    pub fn load_with_warnings(path: &Path) -> BundleResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// The aggregate root symbol
    pub fn root(&self) -> BundleResult<Identifier> {
        Identifier::parse(&self.bundle.name, "bundle name")
    }

    /// Output path, relative to the manifest directory
    pub fn output_path(&self) -> PathBuf {
        self.bundle
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.lua", self.bundle.name)))
    }

    /// Validated registry in manifest order
    pub fn registry(&self) -> BundleResult<ModuleRegistry> {
        let descriptors = self
            .modules
            .iter()
            .enumerate()
            .map(|(order, entry)| entry.descriptor(order))
            .collect::<BundleResult<Vec<_>>>()?;
        ModuleRegistry::new(descriptors)
    }

    /// Validated environment handles in manifest order
    pub fn environment(&self) -> BundleResult<Vec<EnvironmentHandle>> {
        self.environment
            .iter()
            .map(|entry| {
                Ok(EnvironmentHandle {
                    name: Identifier::parse(&entry.name, "environment handle")?,
                    value: entry.value.clone(),
                })
            })
            .collect()
    }

    pub fn linker(&self) -> BundleResult<Linker> {
        let table = Identifier::parse(&self.linker.registry, "registry table")?;
        Ok(Linker::new(table, self.linker.call))
    }
}
