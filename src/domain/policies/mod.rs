//! Domain Policies
//!
//! Rules that vary per build. `ScopeStrategy` decides how module bodies are
//! wrapped and which of their names the rest of the unit can see.

mod scope_strategy;

pub use scope_strategy::{
    indent_body, strategy_for, BlockScopedStrategy, ClosureStrategy, GlobalPromotionStrategy,
    ScopeStrategy,
};
