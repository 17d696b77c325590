//! Scope Strategy
//!
//! Decides how a behavioral module's definitions are exposed to the rest of
//! the combined unit. Exactly one strategy is active per build.
//!
//! | Strategy  | Container form | Names visible to later code        |
//! |-----------|----------------|------------------------------------|
//! | `closure` | local          | exported symbol, module globals    |
//! | `global`  | global         | every top-level local and global   |
//! | `block`   | global         | module globals only                |

use crate::domain::entities::TransformedModule;
use crate::domain::services::lua_scan;
use crate::domain::value_objects::{ContainerForm, StrategyKind};
use crate::error::{BundleError, BundleResult};

pub trait ScopeStrategy {
    fn kind(&self) -> StrategyKind;

    /// Declaration form the transformer must normalize the container to
    fn container_form(&self) -> ContainerForm;

    /// Names a behavioral module binds in the unit's shared top-level scope
    fn exposed_names(&self, module: &TransformedModule) -> Vec<String>;

    /// Emit the definition segment for a behavioral module (no banner)
    fn wrap(&self, module: &TransformedModule) -> String;

    /// False when the body is emitted at chunk level as is
    fn wraps_body(&self) -> bool {
        true
    }

    /// Reject a body that cannot be emitted inside this strategy's wrapper.
    /// Luau only accepts `export type` at chunk level.
    fn check(&self, module: &TransformedModule) -> BundleResult<()> {
        if module.is_data() || !self.wraps_body() {
            return Ok(());
        }
        match lua_scan::scan(&module.body).exported_type(&module.body) {
            Some(alias) => Err(BundleError::TransformationAmbiguity {
                module: module.name.to_string(),
                reason: format!(
                    "`export type {alias}` is only legal at chunk level; \
                     use the global strategy or drop `export`"
                ),
            }),
            None => Ok(()),
        }
    }

    /// Names a module of either kind claims in the shared scope
    fn claims(&self, module: &TransformedModule) -> Vec<String> {
        if module.is_data() {
            vec![module.exported_symbol.to_string()]
        } else {
            self.exposed_names(module)
        }
    }
}

/// Immediately-invoked function per module. Only the returned container
/// becomes a chunk-level local.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosureStrategy;

impl ScopeStrategy for ClosureStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Closure
    }

    fn container_form(&self) -> ContainerForm {
        ContainerForm::Local
    }

    fn exposed_names(&self, module: &TransformedModule) -> Vec<String> {
        let symbol = module.exported_symbol.as_str();
        let mut names = vec![symbol.to_string()];
        names.extend(
            module
                .bindings
                .globals
                .iter()
                .filter(|g| g.as_str() != symbol)
                .cloned(),
        );
        names
    }

    fn wrap(&self, module: &TransformedModule) -> String {
        let symbol = &module.exported_symbol;
        format!(
            "local {symbol} = (function()\n{}\n\n\treturn {symbol}\nend)()",
            indent_body(&module.body)
        )
    }
}

/// Module body emitted at chunk level; every top-level binding is shared.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalPromotionStrategy;

impl ScopeStrategy for GlobalPromotionStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Global
    }

    fn container_form(&self) -> ContainerForm {
        ContainerForm::Global
    }

    fn exposed_names(&self, module: &TransformedModule) -> Vec<String> {
        let mut names = module.bindings.locals.clone();
        for global in &module.bindings.globals {
            if !names.contains(global) {
                names.push(global.clone());
            }
        }
        names
    }

    fn wraps_body(&self) -> bool {
        false
    }

    fn wrap(&self, module: &TransformedModule) -> String {
        module.body.clone()
    }
}

/// `do ... end` around each module; locals stay private, globals escape.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockScopedStrategy;

impl ScopeStrategy for BlockScopedStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Block
    }

    fn container_form(&self) -> ContainerForm {
        ContainerForm::Global
    }

    fn exposed_names(&self, module: &TransformedModule) -> Vec<String> {
        module.bindings.globals.clone()
    }

    fn wrap(&self, module: &TransformedModule) -> String {
        format!("do\n{}\nend", indent_body(&module.body))
    }
}

/// Indent every non-empty line with one tab, except lines that start inside
/// a multi-line string or comment.
pub fn indent_body(body: &str) -> String {
    let protected = lua_scan::protected_line_starts(body);
    let mut out = String::with_capacity(body.len() + body.len() / 16);
    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        let content = line.trim_end_matches('\n');
        if protected.contains(&offset) {
            out.push_str(line);
        } else if content.trim().is_empty() {
            out.push_str(&line[content.len()..]);
        } else {
            out.push('\t');
            out.push_str(line);
        }
        offset += line.len();
    }
    out
}

/// Strategy implementation for a manifest selector
pub fn strategy_for(kind: StrategyKind) -> Box<dyn ScopeStrategy> {
    match kind {
        StrategyKind::Closure => Box::new(ClosureStrategy),
        StrategyKind::Global => Box::new(GlobalPromotionStrategy),
        StrategyKind::Block => Box::new(BlockScopedStrategy),
    }
}
