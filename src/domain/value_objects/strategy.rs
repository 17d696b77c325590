//! Strategy selectors read from the manifest
//!
//! - `StrategyKind`: which scope strategy wraps behavioral modules
//! - `ContainerForm`: how a strategy wants the container declared
//! - `CallStyle`: how phase 2 invokes `Initialize`

use serde::{Deserialize, Serialize};

/// Scope strategy selected for a build. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Immediately-invoked function per module, value returned
    Closure,
    /// Module body at chunk level, container promoted to a global
    Global,
    /// `do ... end` block per module, container promoted to a global
    #[default]
    Block,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Closure => "closure",
            StrategyKind::Global => "global",
            StrategyKind::Block => "block",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration form of a module's container after normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerForm {
    /// `local X = ...` / `local function X`
    Local,
    /// `X = ...` / `function X`
    Global,
}

/// How the initialization segment calls a module's entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CallStyle {
    /// `X:Initialize(deps)`
    #[default]
    Method,
    /// `X.Initialize(deps)`
    Function,
}

impl CallStyle {
    pub fn separator(&self) -> char {
        match self {
            CallStyle::Method => ':',
            CallStyle::Function => '.',
        }
    }
}
