//! Special-case loader for data payload modules
//!
//! A data module is one literal, returned. It skips the transformer and the
//! scope strategy: the literal is emitted as a single global binding with its
//! bytes untouched, so comment-looking lines inside it survive.

use super::lua_scan::{self, StatementKind};
use crate::domain::entities::{ModuleDescriptor, TopLevelBindings, TransformedModule};
use crate::error::{BundleError, BundleResult};

/// Load `raw` as the payload of a data module.
pub fn load(descriptor: &ModuleDescriptor, raw: &str) -> BundleResult<TransformedModule> {
    let payload = extract_payload(descriptor.name().as_str(), raw)?;
    Ok(TransformedModule {
        name: descriptor.name().clone(),
        exported_symbol: descriptor.symbol().clone(),
        kind: descriptor.kind(),
        body: payload.to_string(),
        bindings: TopLevelBindings {
            locals: Vec::new(),
            globals: vec![descriptor.symbol().to_string()],
        },
    })
}

/// Find the payload expression.
///
/// Accepted shapes, comments aside:
/// - `return <expr>`
/// - `local X = <expr>` followed by `return X`
pub fn extract_payload<'a>(module: &str, raw: &'a str) -> BundleResult<&'a str> {
    let scan = lua_scan::scan(raw);
    let payload = match scan.statements.as_slice() {
        [only] => match &only.kind {
            StatementKind::Return {
                value: Some(value), ..
            } => Some(value.clone()),
            _ => None,
        },
        [decl, ret] => match (&decl.kind, &ret.kind) {
            (
                StatementKind::Local {
                    names,
                    is_function: false,
                    value: Some(value),
                },
                StatementKind::Return {
                    single_name: Some(returned),
                    ..
                },
            ) if names.len() == 1 && names[0].name == *returned => Some(value.clone()),
            _ => None,
        },
        _ => None,
    };

    payload.map(|range| &raw[range]).ok_or_else(|| {
        BundleError::TransformationAmbiguity {
            module: module.to_string(),
            reason: "a data module must consist of a single returned literal".to_string(),
        }
    })
}

/// The module's segment: `X = <payload>`.
pub fn render_binding(module: &TransformedModule) -> String {
    format!("{} = {}", module.exported_symbol, module.body)
}
