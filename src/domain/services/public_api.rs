//! Public API segment
//!
//! The API template is the entry file a multi-file build would load first.
//! Inside the combined unit its `require` lines are dead: every module is
//! already bound, so they are removed, and anything still required from
//! outside the bundle is an error.

use std::ops::Range;

use super::conflict_resolver::ConflictResolver;
use super::lua_scan::{self, StatementKind, Token, TokenKind};
use crate::domain::entities::{ModuleRegistry, TopLevelBindings};
use crate::error::{BundleError, BundleResult};

/// Owner name for the API template in errors and collision reports
pub const API_OWNER: &str = "public API";

/// Processed API template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicApi {
    pub body: String,
    pub bindings: TopLevelBindings,
}

/// Process `template` against the registry.
pub fn prepare(
    template: &str,
    resolver: &ConflictResolver,
    registry: &ModuleRegistry,
) -> BundleResult<PublicApi> {
    let source = template.replace("\r\n", "\n");
    let scan = lua_scan::scan(&source);
    let mut edits: Vec<(Range<usize>, String)> = Vec::new();

    for stmt in &scan.statements {
        let StatementKind::Local {
            names,
            is_function: false,
            value: Some(value),
        } = &stmt.kind
        else {
            continue;
        };
        if names.len() != 1 || !is_require_call(&scan.code, &source, value.start) {
            continue;
        }
        let bound = names[0].name.as_str();
        let target = registry
            .iter()
            .find(|m| m.symbol() == bound)
            .or_else(|| registry.iter().find(|m| m.name() == bound));
        let Some(target) = target else {
            return Err(BundleError::UnresolvedRequire {
                owner: API_OWNER.to_string(),
                target: source[value.clone()].to_string(),
            });
        };
        if target.symbol() == bound {
            let span = lua_scan::whole_line_span(&source, stmt.span.clone())
                .unwrap_or_else(|| stmt.span.clone());
            edits.push((span, String::new()));
        } else {
            // Bound under the module name; point it at the exported symbol
            edits.push((stmt.span.clone(), format!("local {bound} = {}", target.symbol())));
        }
    }

    // Any require left outside the removed lines reaches beyond the unit
    for (index, tok) in scan.code.iter().enumerate() {
        if tok.kind != TokenKind::Name || tok.text(&source) != "require" {
            continue;
        }
        if edits.iter().any(|(range, _)| range.contains(&tok.start)) {
            continue;
        }
        if let Some(end) = call_end(&scan.code, &source, index) {
            return Err(BundleError::UnresolvedRequire {
                owner: API_OWNER.to_string(),
                target: source[tok.start..end].to_string(),
            });
        }
    }

    if let Some(ret) = scan.trailing_return() {
        match &ret.kind {
            StatementKind::Return {
                single_name: Some(name),
                ..
            } if resolver.root() == name.as_str() => {
                let span = lua_scan::whole_line_span(&source, ret.span.clone())
                    .unwrap_or_else(|| ret.span.clone());
                edits.push((span, String::new()));
            }
            _ => {
                return Err(BundleError::TransformationAmbiguity {
                    module: API_OWNER.to_string(),
                    reason: format!(
                        "template ends with `{}` instead of `return {}`",
                        source[ret.span.clone()].lines().next().unwrap_or_default().trim(),
                        resolver.root()
                    ),
                })
            }
        }
    }

    let edited = lua_scan::apply_edits(&source, edits);
    let (neutralized, _) = resolver.neutralize(API_OWNER, &edited);
    let body = lua_scan::trim_blank_edges(&collapse_blank_lines(&neutralized)).to_string();
    let bindings = lua_scan::scan(&body).bindings();
    Ok(PublicApi { body, bindings })
}

fn is_require_call(code: &[Token], src: &str, value_start: usize) -> bool {
    code.iter()
        .position(|t| t.start == value_start)
        .is_some_and(|i| code[i].text(src) == "require" && call_end(code, src, i).is_some())
}

/// End offset of the call whose callee is `code[callee]`, if it is one.
fn call_end(code: &[Token], src: &str, callee: usize) -> Option<usize> {
    let open = code.get(callee + 1)?;
    match (open.kind, open.text(src)) {
        (TokenKind::Str, _) => Some(open.end),
        (TokenKind::Punct, "(") => {
            let mut depth = 0usize;
            for tok in &code[callee + 1..] {
                match tok.text(src) {
                    "(" => depth += 1,
                    ")" => {
                        depth -= 1;
                        if depth == 0 {
                            return Some(tok.end);
                        }
                    }
                    _ => {}
                }
            }
            code.last().map(|t| t.end)
        }
        _ => None,
    }
}

/// Collapse runs of blank lines to one, leaving multi-line strings alone.
fn collapse_blank_lines(src: &str) -> String {
    let protected = lua_scan::protected_line_starts(src);
    let mut out = String::with_capacity(src.len());
    let mut offset = 0;
    let mut previous_blank = false;
    for line in src.split_inclusive('\n') {
        let blank = line.trim().is_empty() && !protected.contains(&offset);
        if !(blank && previous_blank) {
            out.push_str(if blank { "\n" } else { line });
        }
        previous_blank = blank;
        offset += line.len();
    }
    out
}
