//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod hash;
mod identifier;
mod strategy;

pub use config_warning::ConfigWarning;
pub use hash::ContentHash;
pub use identifier::{is_valid_identifier, Identifier, LUA_KEYWORDS};
pub use strategy::{CallStyle, ContainerForm, StrategyKind};
