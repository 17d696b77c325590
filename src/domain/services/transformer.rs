//! Content Transformer
//!
//! Rewrites one behavioral module's source so it can be emitted inline:
//!
//! 1. full-line comments are stripped
//! 2. the trailing `return <symbol>` is removed
//! 3. the container declaration is normalized to the strategy's form
//!
//! Edits are located with [`lua_scan`], never with text patterns. Running the
//! transformer on its own output is a no-op.

use std::ops::Range;

use tracing::debug;

use super::lua_scan::{self, Scan, StatementKind};
use crate::domain::entities::{ModuleDescriptor, TransformedModule};
use crate::domain::value_objects::ContainerForm;
use crate::error::{BundleError, BundleResult};

type Edit = (Range<usize>, String);

#[derive(Debug, Clone, Copy)]
pub struct Transformer {
    form: ContainerForm,
}

impl Transformer {
    pub fn new(form: ContainerForm) -> Self {
        Self { form }
    }

    pub fn form(&self) -> ContainerForm {
        self.form
    }

    pub fn transform(
        &self,
        descriptor: &ModuleDescriptor,
        raw: &str,
    ) -> BundleResult<TransformedModule> {
        let body = self.transform_source(
            descriptor.name().as_str(),
            descriptor.symbol().as_str(),
            raw,
        )?;
        let bindings = lua_scan::scan(&body).bindings();
        debug!(
            module = %descriptor.name(),
            locals = bindings.locals.len(),
            globals = bindings.globals.len(),
            "transformed module"
        );
        Ok(TransformedModule {
            name: descriptor.name().clone(),
            exported_symbol: descriptor.symbol().clone(),
            kind: descriptor.kind(),
            body,
            bindings,
        })
    }

    /// Transform `raw`, the source of `module` whose container is `symbol`.
    pub fn transform_source(&self, module: &str, symbol: &str, raw: &str) -> BundleResult<String> {
        let normalized = raw.replace("\r\n", "\n");
        let stripped = lua_scan::strip_comment_lines(&normalized);
        let scan = lua_scan::scan(&stripped);

        let mut edits = Vec::new();
        if let Some(edit) = trailing_export_edit(&stripped, &scan, symbol)
            .map_err(|reason| ambiguity(module, reason))?
        {
            edits.push(edit);
        }
        edits.extend(
            self.container_edits(&scan, symbol)
                .map_err(|reason| ambiguity(module, reason))?,
        );

        // Removing a statement can leave a trailing comment alone on its line
        let edited = lua_scan::apply_edits(&stripped, edits);
        let cleaned = lua_scan::strip_comment_lines(&edited);
        Ok(lua_scan::trim_blank_edges(&cleaned).to_string())
    }

    fn container_edits(&self, scan: &Scan, symbol: &str) -> Result<Vec<Edit>, String> {
        let binders: Vec<_> = scan
            .statements
            .iter()
            .filter(|s| s.declares(symbol))
            .collect();
        let Some(first) = binders.first() else {
            return Err(format!("no top-level declaration of container `{symbol}`"));
        };

        let local_declarations = binders.iter().filter(|s| s.is_local()).count();
        if local_declarations > 1 {
            return Err(format!("container `{symbol}` is declared local more than once"));
        }
        if local_declarations == 1 && !first.is_local() {
            return Err(format!(
                "container `{symbol}` is declared local after it is first assigned"
            ));
        }

        let start = first.span.start;
        let edits = match (self.form, &first.kind) {
            (ContainerForm::Local, StatementKind::Assign { targets, value }) => {
                if targets.len() > 1 {
                    return Err(format!(
                        "container `{symbol}` is assigned in a multi-target statement"
                    ));
                }
                let Some(value) = value else {
                    return Err(format!("container `{symbol}` is assigned without a value"));
                };
                vec![(start..value.start, format!("local {symbol} = "))]
            }
            (ContainerForm::Local, StatementKind::Function { .. }) => {
                vec![(start..start, "local ".to_string())]
            }
            (
                ContainerForm::Global,
                StatementKind::Local {
                    is_function: true, ..
                },
            ) => {
                let function_kw = scan.code[first.tokens.start + 1];
                vec![(start..function_kw.start, String::new())]
            }
            (ContainerForm::Global, StatementKind::Local { names, value, .. }) => {
                if names.len() > 1 {
                    return Err(format!(
                        "container `{symbol}` shares a multi-name local declaration"
                    ));
                }
                match value {
                    Some(value) => vec![(start..value.start, format!("{symbol} = "))],
                    None => vec![(first.span.clone(), format!("{symbol} = nil"))],
                }
            }
            _ => Vec::new(),
        };
        Ok(edits)
    }
}

/// Removal of the trailing `return <symbol>`, if the module has one.
fn trailing_export_edit(src: &str, scan: &Scan, symbol: &str) -> Result<Option<Edit>, String> {
    let Some(ret) = scan.trailing_return() else {
        return Ok(None);
    };
    match &ret.kind {
        StatementKind::Return {
            single_name: Some(name),
            ..
        } if name == symbol => {
            let span = lua_scan::whole_line_span(src, ret.span.clone())
                .unwrap_or_else(|| ret.span.clone());
            Ok(Some((span, String::new())))
        }
        _ => Err(format!(
            "module ends with `{}` instead of `return {symbol}`",
            first_line(&src[ret.span.clone()])
        )),
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default().trim()
}

fn ambiguity(module: &str, reason: String) -> BundleError {
    BundleError::TransformationAmbiguity {
        module: module.to_string(),
        reason,
    }
}
