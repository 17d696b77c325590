//! Conflict Resolver
//!
//! Two jobs:
//!
//! - neutralize top-level redeclarations of the aggregate root, which the
//!   preamble declares exactly once
//! - after resolution, reject any top-level name claimed by two owners
//!   (modules, the preamble, the linker table, the public API)

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::warn;

use super::assembler::EnvironmentHandle;
use super::lua_scan::{self, StatementKind};
use crate::domain::entities::{ModuleRegistry, TransformedModule};
use crate::domain::value_objects::Identifier;
use crate::error::{BundleError, BundleResult};

/// Owner name for the aggregate root declaration
pub const PREAMBLE_OWNER: &str = "<preamble>";
/// Owner name for `[[environment]]` handles
pub const ENVIRONMENT_OWNER: &str = "<environment>";
/// Discard name written into the root's slot of a shared declaration
const PLACEHOLDER: &str = "_";
/// Owner name for the dependency-map table
pub const LINKER_OWNER: &str = "<linker>";

/// Names one owner binds in the unit's shared top-level scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub owner: String,
    pub names: Vec<String>,
}

impl Claim {
    pub fn new(owner: impl Into<String>, names: Vec<String>) -> Self {
        Self {
            owner: owner.into(),
            names,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConflictResolver {
    root: Identifier,
}

impl ConflictResolver {
    pub fn new(root: Identifier) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Identifier {
        &self.root
    }

    /// Static checks on preamble handles and exported symbols, run before
    /// any source is read. Every name here is declared exactly once.
    pub fn check_registry(
        &self,
        registry: &ModuleRegistry,
        environment: &[EnvironmentHandle],
    ) -> BundleResult<()> {
        let mut owners: HashMap<&str, &str> = HashMap::new();
        owners.insert(self.root.as_str(), PREAMBLE_OWNER);

        let handles = environment
            .iter()
            .map(|handle| (handle.name.as_str(), ENVIRONMENT_OWNER));
        let symbols = registry
            .iter()
            .map(|module| (module.symbol().as_str(), module.name().as_str()));

        for (symbol, owner) in handles.chain(symbols) {
            match owners.entry(symbol) {
                Entry::Occupied(first) => {
                    return Err(BundleError::SymbolCollision {
                        symbol: symbol.to_string(),
                        first: first.get().to_string(),
                        second: owner.to_string(),
                    })
                }
                Entry::Vacant(slot) => {
                    slot.insert(owner);
                }
            }
        }
        Ok(())
    }

    /// Replace top-level declarations of the root in `body` with an inert
    /// marker. Returns the new text and the number of declarations touched.
    pub fn neutralize(&self, owner: &str, body: &str) -> (String, usize) {
        let root = self.root.as_str();
        let scan = lua_scan::scan(body);
        let mut edits = Vec::new();
        let mut count = 0;

        for stmt in scan.statements.iter().filter(|s| s.declares(root)) {
            let shared = match &stmt.kind {
                StatementKind::Local { names, .. } if names.len() > 1 => Some(names),
                StatementKind::Assign { targets, .. } if targets.len() > 1 => Some(targets),
                _ => None,
            };
            match shared {
                // Keep the other names; bind the root's slot to a throwaway
                Some(bindings) => edits.extend(
                    bindings
                        .iter()
                        .filter(|b| b.name == root)
                        .map(|b| (b.span.clone(), PLACEHOLDER.to_string())),
                ),
                None => edits.push((stmt.span.clone(), self.marker())),
            }
            count += 1;
            warn!(owner = %owner, root = %root, "neutralized redeclaration of the aggregate root");
        }

        if count == 0 {
            return (body.to_string(), 0);
        }
        (lua_scan::apply_edits(body, edits), count)
    }

    /// Neutralize root redeclarations in a behavioral module and refresh its
    /// bindings. Data payloads are never touched.
    pub fn resolve(&self, module: &mut TransformedModule) -> usize {
        if module.is_data() {
            return 0;
        }
        let (body, count) = self.neutralize(module.name.as_str(), &module.body);
        if count > 0 {
            let own_local = module.bindings.locals.iter().any(|n| n == PLACEHOLDER);
            let own_global = module.bindings.globals.iter().any(|n| n == PLACEHOLDER);
            module.body = body;
            module.bindings = lua_scan::scan(&module.body).bindings();
            // A discard written by neutralization belongs to nobody
            if !own_local {
                module.bindings.locals.retain(|n| n != PLACEHOLDER);
            }
            if !own_global {
                module.bindings.globals.retain(|n| n != PLACEHOLDER);
            }
        }
        count
    }

    /// Fail on the first name claimed by two different owners.
    pub fn check_collisions(&self, claims: &[Claim]) -> BundleResult<()> {
        let mut owners: HashMap<&str, &str> = HashMap::new();
        for claim in claims {
            for name in &claim.names {
                match owners.entry(name.as_str()) {
                    Entry::Occupied(first) if *first.get() != claim.owner => {
                        return Err(BundleError::SymbolCollision {
                            symbol: name.clone(),
                            first: first.get().to_string(),
                            second: claim.owner.clone(),
                        });
                    }
                    Entry::Occupied(_) => {}
                    Entry::Vacant(slot) => {
                        slot.insert(claim.owner.as_str());
                    }
                }
            }
        }
        Ok(())
    }

    fn marker(&self) -> String {
        format!("--[[ redeclaration of '{}' removed; the preamble owns it ]]", self.root)
    }
}
