//! Assembler
//!
//! Concatenates the combined unit in its fixed section order:
//!
//! ```text
//! header
//! environment preamble      local <handle> = <expr> ... local <Root> = {}
//! module segments           registry order, one banner each
//! initialization segment    dependency map + Initialize calls
//! public API segment        optional
//! final export              return <Root>
//! ```

use std::collections::HashSet;

use chrono::NaiveDate;

use super::data_loader;
use super::linker::Linker;
use super::lua_scan;
use super::public_api::PublicApi;
use crate::domain::entities::{CombinedUnit, ModuleRegistry, Segment, TransformedModule};
use crate::domain::policies::ScopeStrategy;
use crate::domain::value_objects::Identifier;

/// Header used when the manifest names no template
pub const DEFAULT_HEADER: &str = "\
-- {name} v{version}
-- Built from {modules} modules on {date}
-- Load this file as a single chunk; its parts cannot be required separately.";

const BANNER_RULE: &str = "-- ============================================================";

/// A capability handle acquired once from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentHandle {
    pub name: Identifier,
    /// Lua expression evaluated once in the preamble
    pub value: String,
}

/// Everything the assembler needs besides the strategy and linker
#[derive(Debug, Clone, Copy)]
pub struct AssemblyInput<'a> {
    pub header_template: &'a str,
    pub version: &'a str,
    pub build_date: NaiveDate,
    pub environment: &'a [EnvironmentHandle],
    pub registry: &'a ModuleRegistry,
    /// Same order as `registry`
    pub modules: &'a [TransformedModule],
    pub api: Option<&'a PublicApi>,
}

pub struct Assembler<'a> {
    root: &'a Identifier,
    strategy: &'a dyn ScopeStrategy,
    linker: &'a Linker,
}

impl<'a> Assembler<'a> {
    pub fn new(root: &'a Identifier, strategy: &'a dyn ScopeStrategy, linker: &'a Linker) -> Self {
        Self {
            root,
            strategy,
            linker,
        }
    }

    pub fn assemble(&self, input: &AssemblyInput<'_>) -> CombinedUnit {
        CombinedUnit {
            header: self.header(input),
            preamble: self.preamble(input.environment),
            segments: input.modules.iter().map(|m| self.segment(m)).collect(),
            init_segment: format!(
                "{}\n{}",
                banner("Initialization"),
                self.linker.init_segment(input.registry)
            ),
            api_segment: input
                .api
                .filter(|api| !api.body.is_empty())
                .map(|api| format!("{}\n{}", banner("Public API"), api.body))
                .unwrap_or_default(),
            final_export: format!("return {}", self.root),
        }
    }

    fn header(&self, input: &AssemblyInput<'_>) -> String {
        let filled = input
            .header_template
            .replace("{name}", self.root.as_str())
            .replace("{version}", input.version)
            .replace("{date}", &input.build_date.format("%Y-%m-%d").to_string())
            .replace("{modules}", &input.registry.len().to_string());
        comment_out(filled.trim_end())
    }

    fn preamble(&self, environment: &[EnvironmentHandle]) -> String {
        let mut out = String::new();
        for handle in environment {
            out.push_str(&format!("local {} = {}\n", handle.name, handle.value.trim()));
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("local {} = {{}}", self.root));
        out
    }

    fn segment(&self, module: &TransformedModule) -> Segment {
        let (title, body) = if module.is_data() {
            (
                format!("{} (data)", module.name),
                data_loader::render_binding(module),
            )
        } else {
            (module.name.to_string(), self.strategy.wrap(module))
        };
        Segment {
            module: module.name.to_string(),
            kind: module.kind,
            text: format!("{}\n{}", banner(&title), body),
        }
    }
}

/// Prefix `-- ` to every header line that is not already comment text, so
/// the header can never execute.
fn comment_out(text: &str) -> String {
    let inside_comment: HashSet<usize> = lua_scan::scan(text)
        .comments
        .iter()
        .flat_map(|c| {
            c.text(text)
                .match_indices('\n')
                .map(move |(offset, _)| c.start + offset + 1)
        })
        .collect();

    let mut out = String::with_capacity(text.len());
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let content = line.trim();
        if inside_comment.contains(&offset) || content.is_empty() || content.starts_with("--") {
            out.push_str(line);
        } else {
            out.push_str("-- ");
            out.push_str(line);
        }
        offset += line.len();
    }
    out
}

/// Three-line banner comment
pub fn banner(title: &str) -> String {
    format!("{BANNER_RULE}\n-- {title}\n{BANNER_RULE}")
}
