//! Presentation Layer
//!
//! Report and error rendering for the binary (text or JSON).

pub mod output;

pub use output::{error_json, render_error, render_report, report_json, OutputFormat};
