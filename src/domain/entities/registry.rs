//! Module registry entity
//!
//! The ordered list of modules that make up one bundle. Registry order is
//! both the emission order of definition segments and the order in which
//! phase 2 initializes modules.

use std::collections::HashSet;

use super::module::ModuleDescriptor;
use crate::error::{BundleError, BundleResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleRegistry {
    modules: Vec<ModuleDescriptor>,
}

impl ModuleRegistry {
    /// Build a registry, rejecting duplicate names and invalid option mixes.
    ///
    /// Dependency existence and ordering are checked by the linker, not here.
    pub fn new(modules: Vec<ModuleDescriptor>) -> BundleResult<Self> {
        let mut seen = HashSet::new();
        for module in &modules {
            if !seen.insert(module.name().as_str()) {
                return Err(BundleError::DuplicateModule {
                    name: module.name().to_string(),
                });
            }
            if module.is_data() && !module.depends().is_empty() {
                return Err(BundleError::InvalidModule {
                    module: module.name().to_string(),
                    reason: "data modules cannot declare dependencies".to_string(),
                });
            }
            if !module.is_data() && !module.initialize() && !module.depends().is_empty() {
                return Err(BundleError::InvalidModule {
                    module: module.name().to_string(),
                    reason: "dependencies are only delivered through Initialize, which is disabled"
                        .to_string(),
                });
            }
        }
        Ok(Self { modules })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.name() == name)
    }

    /// Registry position of `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.modules.iter().position(|m| m.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name().as_str()).collect()
    }
}
