//! Module entities
//!
//! A `ModuleDescriptor` is what the manifest says about a module. A
//! `TransformedModule` is what the transformer (or the data loader) produced
//! from its source text.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Identifier;

/// How a module's source is brought into the combined unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Defines a container table and exposes an `Initialize` entry point
    #[default]
    Behavioral,
    /// A single returned literal, inlined as an assignment
    Data,
}

impl ModuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::Behavioral => "behavioral",
            ModuleKind::Data => "data",
        }
    }
}

/// A module as declared in the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    name: Identifier,
    symbol: Identifier,
    source_path: PathBuf,
    order: usize,
    kind: ModuleKind,
    depends: Vec<Identifier>,
    initialize: bool,
}

impl ModuleDescriptor {
    /// Behavioral module whose exported symbol equals its name
    pub fn new(order: usize, name: Identifier, source_path: impl Into<PathBuf>) -> Self {
        Self {
            symbol: name.clone(),
            name,
            source_path: source_path.into(),
            order,
            kind: ModuleKind::Behavioral,
            depends: Vec::new(),
            initialize: true,
        }
    }

    pub fn with_symbol(mut self, symbol: Identifier) -> Self {
        self.symbol = symbol;
        self
    }

    /// Data modules are never initialized.
    pub fn with_kind(mut self, kind: ModuleKind) -> Self {
        self.kind = kind;
        if kind == ModuleKind::Data {
            self.initialize = false;
        }
        self
    }

    pub fn with_depends(mut self, depends: Vec<Identifier>) -> Self {
        self.depends = depends;
        self
    }

    pub fn with_initialize(mut self, initialize: bool) -> Self {
        self.initialize = initialize && self.kind == ModuleKind::Behavioral;
        self
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    /// Name the module's container is bound to
    pub fn symbol(&self) -> &Identifier {
        &self.symbol
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Position in the registry (0-based)
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    pub fn is_data(&self) -> bool {
        self.kind == ModuleKind::Data
    }

    /// Names of modules handed to this module's `Initialize`
    pub fn depends(&self) -> &[Identifier] {
        &self.depends
    }

    pub fn initialize(&self) -> bool {
        self.initialize
    }
}

/// Names a module binds in its own top-level scope
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopLevelBindings {
    /// `local` declarations, in source order
    pub locals: Vec<String>,
    /// Bare assignments and global function declarations not shadowed by a local
    pub globals: Vec<String>,
}

impl TopLevelBindings {
    pub fn contains(&self, name: &str) -> bool {
        self.locals.iter().chain(&self.globals).any(|n| n == name)
    }
}

/// A module's source after transformation, ready for wrapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedModule {
    pub name: Identifier,
    pub exported_symbol: Identifier,
    pub kind: ModuleKind,
    /// Transformed text. For data modules, the payload expression verbatim.
    pub body: String,
    pub bindings: TopLevelBindings,
}

impl TransformedModule {
    pub fn is_data(&self) -> bool {
        self.kind == ModuleKind::Data
    }
}
