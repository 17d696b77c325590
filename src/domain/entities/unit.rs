//! Combined unit entity - the single emitted artifact
//!
//! Sections are kept apart until `render`, so tests can check ordering
//! without parsing the output.

use super::module::ModuleKind;

/// One module's definition segment, banner included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub module: String,
    pub kind: ModuleKind,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedUnit {
    pub header: String,
    pub preamble: String,
    pub segments: Vec<Segment>,
    pub init_segment: String,
    /// Empty when the manifest has no API template
    pub api_segment: String,
    pub final_export: String,
}

impl CombinedUnit {
    /// Module names in emission order
    pub fn segment_order(&self) -> Vec<&str> {
        self.segments.iter().map(|s| s.module.as_str()).collect()
    }

    /// Join all non-empty sections with one blank line between them.
    ///
    /// The result always ends with exactly one newline.
    pub fn render(&self) -> String {
        let sections = std::iter::once(self.header.as_str())
            .chain(std::iter::once(self.preamble.as_str()))
            .chain(self.segments.iter().map(|s| s.text.as_str()))
            .chain([
                self.init_segment.as_str(),
                self.api_segment.as_str(),
                self.final_export.as_str(),
            ])
            .map(str::trim_end)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let mut out = sections.join("\n\n");
        out.push('\n');
        out
    }
}
