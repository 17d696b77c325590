//! Scenario: First Bundle
//!
//! Journey: A library author links a small UI kit into one file.
//!
//! Steps:
//! 1. Author writes `bundle.toml` and the module sources
//! 2. Runs `monolink` and gets `Kit.lua`
//! 3. Breaks a module, reruns, and sees which module failed
//! 4. Fixes it, reruns, and gets a new unit
//!
//! Success Criteria:
//! - The unit is never half-written
//! - Errors name the offending module
//! - Rebuilding unchanged sources is byte-identical

use crate::common::*;
use crate::{assert_before, assert_built, assert_output_contains};

/// SCENARIO: author builds, breaks and repairs a kit
#[test]
fn scenario_first_bundle_complete_journey() {
    // Step 1-2: build from scratch
    let project = TestProject::kit("block");
    let result = project.run(&[]);
    assert!(
        result.success,
        "Step 2: build should succeed.\nstderr: {}\nstdout: {}",
        result.stderr, result.stdout
    );
    assert_built!(project, "Kit.lua");
    let first = project.read("Kit.lua");

    // The preamble, segments, wiring and API land in that order
    assert_before!(first, "local Players = game:GetService(\"Players\")", "local Kit = {}");
    assert_before!(first, "local Kit = {}", "Icons = {");
    assert_before!(first, "Icons = {", "\tTheme = {}");
    assert_before!(first, "\tTheme = {}", "\tButton = {}");
    assert_before!(first, "\tButton = {}", "local __modules = {");
    assert_before!(first, "__modules.Button:Initialize(", "function Kit.Button(label)");
    assert!(!first.contains("require("), "Step 2: API requires should be gone");

    // Rebuilding the same sources is stable
    let again = project.run(&[]);
    assert!(again.success);
    assert_eq!(project.read("Kit.lua"), first);

    // Step 3: break Theme with an unrecognizable export
    project.write("src/Theme.lua", "local Theme = {}\nreturn Theme, 2\n");
    let result = project.run(&[]);
    assert!(!result.success, "Step 3: build should fail");
    assert_output_contains!(result, "module 'Theme' cannot be transformed");
    assert_eq!(
        project.read("Kit.lua"),
        first,
        "Step 3: previous unit must survive a failed build"
    );

    // Step 4: fix it with an extra field
    project.write(
        "src/Theme.lua",
        &THEME.replace("Theme.Accent", "Theme.Muted = \"#64748b\"\nTheme.Accent"),
    );
    let result = project.run(&[]);
    assert!(result.success, "Step 4: stderr: {}", result.stderr);
    let fixed = project.read("Kit.lua");
    assert_ne!(fixed, first);
    assert!(fixed.contains("\tTheme.Muted = \"#64748b\""));
}

/// SCENARIO: the API template pulls in something outside the bundle
#[test]
fn scenario_api_requires_unbundled_module() {
    let project = TestProject::kit("block");
    project.write(
        "init.lua",
        &format!("local Net = require(script.Net)\n{}", INIT),
    );

    let result = project.run(&[]);

    assert!(!result.success);
    assert_output_contains!(result, "public API requires 'require(script.Net)'");
}
