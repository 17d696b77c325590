//! Custom assertion macros for contract and scenario tests.
//!
//! These macros provide descriptive failure messages to aid debugging.

/// Position of `needle` in `haystack`, panicking with context when absent.
pub fn position_of(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("Expected to find '{}' in:\n{}", needle, haystack))
}

/// Assert that the project has a built unit at `path`.
///
/// # Example
/// ```ignore
/// assert_built!(project, "Kit.lua");
/// ```
#[macro_export]
macro_rules! assert_built {
    ($project:expr, $path:expr) => {
        let full_path = $project.path($path);
        assert!(
            full_path.exists(),
            "Expected output at '{}', but it doesn't exist.\nProject root: {:?}",
            $path,
            $project.root.path()
        );
    };
}

/// Assert that no file exists at `path`.
#[macro_export]
macro_rules! assert_not_built {
    ($project:expr, $path:expr) => {
        let full_path = $project.path($path);
        assert!(
            !full_path.exists(),
            "Expected '{}' to NOT exist, but it does.\nProject root: {:?}",
            $path,
            $project.root.path()
        );
    };
}

/// Assert that output (stdout or stderr) contains expected pattern.
///
/// # Example
/// ```ignore
/// assert_output_contains!(result, "Built 3 modules");
/// ```
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $pattern:expr) => {
        assert!(
            $result.stdout.contains($pattern) || $result.stderr.contains($pattern),
            "Expected output to contain '{}'\n\
             stdout:\n{}\n\
             stderr:\n{}",
            $pattern,
            $result.stdout,
            $result.stderr
        );
    };
}

/// Assert that `$first` appears before `$second` in `$text`.
#[macro_export]
macro_rules! assert_before {
    ($text:expr, $first:expr, $second:expr) => {
        let first = $crate::common::position_of(&$text, $first);
        let second = $crate::common::position_of(&$text, $second);
        assert!(
            first < second,
            "Expected '{}' before '{}' in:\n{}",
            $first,
            $second,
            $text
        );
    };
}
