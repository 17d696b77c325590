//! Bundle Pipeline
//!
//! Builds the combined unit in memory:
//!
//! 1. validate the registry (identifiers, duplicates, ordering, root)
//! 2. read and transform each module, one at a time, in registry order
//! 3. neutralize root redeclarations and process the API template
//! 4. reject colliding top-level names
//! 5. assemble
//!
//! Nothing is written here; see `BuildUseCase` for materialization.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::config::BundleConfig;
use crate::domain::entities::{CombinedUnit, ModuleDescriptor, TransformedModule};
use crate::domain::policies::{strategy_for, ScopeStrategy};
use crate::domain::ports::{FileSystem, FsError};
use crate::domain::services::{
    data_loader, public_api, Assembler, AssemblyInput, Claim, ConflictResolver,
    EnvironmentHandle, Linker, PublicApi, Transformer, API_OWNER, DEFAULT_HEADER,
    ENVIRONMENT_OWNER, LINKER_OWNER, PREAMBLE_OWNER,
};
use crate::domain::value_objects::Identifier;
use crate::error::{BundleError, BundleResult};

pub struct BundlePipeline<'a, FS: FileSystem> {
    file_system: &'a FS,
    base_dir: PathBuf,
    config: &'a BundleConfig,
    build_date: NaiveDate,
}

impl<'a, FS: FileSystem> BundlePipeline<'a, FS> {
    /// Paths in `config` resolve against `base_dir`.
    pub fn new(file_system: &'a FS, base_dir: impl Into<PathBuf>, config: &'a BundleConfig) -> Self {
        Self {
            file_system,
            base_dir: base_dir.into(),
            config,
            build_date: Local::now().date_naive(),
        }
    }

    /// Date substituted for `{date}` in the header
    pub fn with_build_date(mut self, build_date: NaiveDate) -> Self {
        self.build_date = build_date;
        self
    }

    pub fn build(&self) -> BundleResult<CombinedUnit> {
        let root = self.config.root()?;
        let registry = self.config.registry()?;
        let environment = self.config.environment()?;
        let linker = self.config.linker()?;

        Linker::check_ordering(&registry)?;
        let resolver = ConflictResolver::new(root.clone());
        resolver.check_registry(&registry, &environment)?;

        let strategy = strategy_for(self.config.bundle.strategy);
        let transformer = Transformer::new(strategy.container_form());
        debug!(strategy = %strategy.kind(), modules = registry.len(), "building");

        let total = registry.len();
        let mut modules = Vec::with_capacity(total);
        for (index, descriptor) in registry.iter().enumerate() {
            info!("[{}/{}] {}", index + 1, total, descriptor.name());
            let raw = self.read_module(descriptor)?;
            let mut module = if descriptor.is_data() {
                data_loader::load(descriptor, &raw)?
            } else {
                transformer.transform(descriptor, &raw)?
            };
            strategy.check(&module)?;
            resolver.resolve(&mut module);
            modules.push(module);
        }

        let api = match &self.config.bundle.api {
            Some(path) => {
                let template = self.read_template(API_OWNER, path)?;
                Some(public_api::prepare(&template, &resolver, &registry)?)
            }
            None => None,
        };

        let claims = self.claims(
            &root,
            &environment,
            &linker,
            strategy.as_ref(),
            &modules,
            api.as_ref(),
        );
        resolver.check_collisions(&claims)?;

        let header_template = match &self.config.bundle.header {
            Some(path) => self.read_template("header", path)?,
            None => DEFAULT_HEADER.to_string(),
        };

        let input = AssemblyInput {
            header_template: &header_template,
            version: &self.config.bundle.version,
            build_date: self.build_date,
            environment: &environment,
            registry: &registry,
            modules: &modules,
            api: api.as_ref(),
        };
        Ok(Assembler::new(&root, strategy.as_ref(), &linker).assemble(&input))
    }

    fn claims(
        &self,
        root: &Identifier,
        environment: &[EnvironmentHandle],
        linker: &Linker,
        strategy: &dyn ScopeStrategy,
        modules: &[TransformedModule],
        api: Option<&PublicApi>,
    ) -> Vec<Claim> {
        let handles = environment.iter().map(|h| h.name.to_string()).collect();

        let mut claims = vec![
            Claim::new(PREAMBLE_OWNER, vec![root.to_string()]),
            Claim::new(ENVIRONMENT_OWNER, handles),
            Claim::new(LINKER_OWNER, vec![linker.table().to_string()]),
        ];
        claims.extend(
            modules
                .iter()
                .map(|m| Claim::new(m.name.as_str(), strategy.claims(m))),
        );
        if let Some(api) = api {
            let names = api
                .bindings
                .locals
                .iter()
                .chain(&api.bindings.globals)
                .cloned()
                .collect();
            claims.push(Claim::new(API_OWNER, names));
        }
        claims
    }

    fn read_module(&self, descriptor: &ModuleDescriptor) -> BundleResult<String> {
        self.read(descriptor.name().as_str(), descriptor.source_path())
    }

    fn read_template(&self, owner: &str, path: &Path) -> BundleResult<String> {
        self.read(owner, path)
    }

    fn read(&self, owner: &str, path: &Path) -> BundleResult<String> {
        self.file_system
            .read(&self.base_dir.join(path))
            .map_err(|e| BundleError::ModuleRead {
                module: owner.to_string(),
                path: path.to_path_buf(),
                message: match e {
                    FsError::NotFound(_) => "file not found".to_string(),
                    FsError::PermissionDenied(_) => "permission denied".to_string(),
                    other => other.to_string(),
                },
            })
    }
}
