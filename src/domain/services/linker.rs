//! Linker - phase 2 wiring
//!
//! Phase 1 is every module segment binding its container. Phase 2, emitted
//! after all of them, builds the dependency map (module name -> container)
//! and hands each behavioral module exactly its declared dependencies through
//! `Initialize(deps)`. Modules never find each other any other way.

use crate::domain::entities::ModuleRegistry;
use crate::domain::value_objects::{CallStyle, Identifier};
use crate::error::{BundleError, BundleResult};

/// Default name of the dependency-map table
pub const DEFAULT_TABLE: &str = "__modules";

#[derive(Debug, Clone)]
pub struct Linker {
    table: Identifier,
    call: CallStyle,
}

impl Linker {
    pub fn new(table: Identifier, call: CallStyle) -> Self {
        Self { table, call }
    }

    /// Name of the dependency-map table
    pub fn table(&self) -> &Identifier {
        &self.table
    }

    /// Every dependency must exist and be registered before its dependent.
    pub fn check_ordering(registry: &ModuleRegistry) -> BundleResult<()> {
        for (index, module) in registry.iter().enumerate() {
            for dependency in module.depends() {
                match registry.position(dependency.as_str()) {
                    None => {
                        return Err(BundleError::UnknownDependency {
                            module: module.name().to_string(),
                            dependency: dependency.to_string(),
                        })
                    }
                    Some(position) if position >= index => {
                        return Err(BundleError::OrderingViolation {
                            module: module.name().to_string(),
                            dependency: dependency.to_string(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }

    /// Dependency map table followed by the `Initialize` calls, in registry order.
    pub fn init_segment(&self, registry: &ModuleRegistry) -> String {
        let table = &self.table;
        let mut out = if registry.is_empty() {
            format!("local {table} = {{}}")
        } else {
            let entries: String = registry
                .iter()
                .map(|m| format!("\t{} = {},\n", m.name(), m.symbol()))
                .collect();
            format!("local {table} = {{\n{entries}}}")
        };

        let calls: Vec<String> = registry
            .iter()
            .filter(|m| m.initialize())
            .map(|m| {
                let deps = if m.depends().is_empty() {
                    "{}".to_string()
                } else {
                    let entries: String = m
                        .depends()
                        .iter()
                        .map(|d| format!("\t{d} = {table}.{d},\n"))
                        .collect();
                    format!("{{\n{entries}}}")
                };
                format!(
                    "{table}.{}{}Initialize({deps})",
                    m.name(),
                    self.call.separator()
                )
            })
            .collect();

        if !calls.is_empty() {
            out.push_str("\n\n");
            out.push_str(&calls.join("\n"));
        }
        out
    }
}
