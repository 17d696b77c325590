//! Output Rendering
//!
//! Text and JSON forms of the build report. Rendering returns strings so
//! the binary decides where they go.

use crate::application::BuildResult;
use crate::domain::value_objects::ConfigWarning;
use crate::error::BundleError;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    warn: &'static str,
    arrow: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            warn: "⚠",
            arrow: "→",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            warn: "[WARN]",
            arrow: "->",
        }
    }

    fn pick(unicode: bool) -> Self {
        if unicode {
            Self::unicode()
        } else {
            Self::ascii()
        }
    }
}

/// Human-readable success report
pub fn render_report(result: &BuildResult, warnings: &[ConfigWarning], unicode: bool) -> String {
    let icons = Icons::pick(unicode);
    let mut out = String::new();
    for warning in warnings {
        out.push_str(&format!("{} {}\n", icons.warn, warning));
    }
    out.push_str(&format!(
        "{} Built {} {} ({} strategy)\n",
        icons.check,
        result.modules,
        if result.modules == 1 { "module" } else { "modules" },
        result.strategy,
    ));
    out.push_str(&format!(
        "  {} {}\n",
        icons.arrow,
        result.output.display()
    ));
    out.push_str(&format!(
        "  Size: {:.2} KB, {} lines\n",
        result.kilobytes(),
        result.lines
    ));
    out.push_str(&format!("  Hash: {}\n", result.hash));
    out
}

/// Human-readable failure line, naming the module when there is one
pub fn render_error(err: &BundleError, unicode: bool) -> String {
    let icons = Icons::pick(unicode);
    format!("{} Build failed: {}", icons.cross, err)
}

/// Machine-readable success report
pub fn report_json(result: &BuildResult, warnings: &[ConfigWarning]) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "output": result.output.display().to_string(),
        "bytes": result.bytes,
        "lines": result.lines,
        "modules": result.modules,
        "order": result.order,
        "strategy": result.strategy,
        "hash": result.hash.as_str(),
        "warnings": warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
    })
}

/// Machine-readable failure report
pub fn error_json(err: &BundleError) -> serde_json::Value {
    serde_json::json!({
        "success": false,
        "error": err.to_string(),
        "module": err.module(),
    })
}
