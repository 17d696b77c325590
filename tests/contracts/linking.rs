//! Contracts for segment order and two-phase wiring.

use monolink::BundleError;

use crate::assert_before;
use crate::common::*;

fn abc(strategy: &str) -> String {
    manifest(
        strategy,
        &[
            "name = \"A\"\npath = \"A.lua\"",
            "name = \"B\"\npath = \"B.lua\"\ndepends = [\"A\"]",
            "name = \"C\"\npath = \"C.lua\"\ndepends = [\"A\", \"B\"]",
        ],
    )
}

fn abc_files() -> Vec<(&'static str, String)> {
    vec![
        ("A.lua", simple_module("A")),
        ("B.lua", simple_module("B")),
        ("C.lua", simple_module("C")),
    ]
}

fn build(strategy: &str) -> monolink::CombinedUnit {
    let files = abc_files();
    let borrowed: Vec<(&str, &str)> = files.iter().map(|(p, c)| (*p, c.as_str())).collect();
    build_in_memory(&abc(strategy), &borrowed).unwrap()
}

/// CONTRACT: segments appear in registry order, for every strategy.
#[test]
fn contract_segments_follow_registry_order() {
    for strategy in ["closure", "global", "block"] {
        let unit = build(strategy);
        assert_eq!(unit.segment_order(), vec!["A", "B", "C"], "{strategy}");

        let text = unit.render();
        assert_before!(text, "-- A\n", "-- B\n");
        assert_before!(text, "-- B\n", "-- C\n");
    }
}

/// CONTRACT: every Initialize call comes after every module definition.
#[test]
fn contract_wiring_follows_all_definitions() {
    let text = build("block").render();

    assert_before!(text, "-- C\n", "local __modules = {");
    assert_before!(text, "local __modules = {", "__modules.A:Initialize({})");
    assert!(text.contains("__modules.B:Initialize({\n\tA = __modules.A,\n})"));
    assert!(text.contains(
        "__modules.C:Initialize({\n\tA = __modules.A,\n\tB = __modules.B,\n})"
    ));
    assert!(text.ends_with("return Kit\n"));
}

/// CONTRACT: a dependency registered after its dependent is rejected.
#[test]
fn contract_forward_dependency_is_an_ordering_violation() {
    let manifest = manifest(
        "block",
        &[
            "name = \"A\"\npath = \"A.lua\"\ndepends = [\"B\"]",
            "name = \"B\"\npath = \"B.lua\"",
        ],
    );
    let a = simple_module("A");
    let b = simple_module("B");

    let err = build_in_memory(&manifest, &[("A.lua", a.as_str()), ("B.lua", b.as_str())]).unwrap_err();

    assert!(
        matches!(
            &err,
            BundleError::OrderingViolation { module, dependency } if module == "A" && dependency == "B"
        ),
        "unexpected error: {err}"
    );
}

/// CONTRACT: a dependency on an unregistered module is rejected.
#[test]
fn contract_unknown_dependency_is_rejected() {
    let manifest = manifest("block", &["name = \"A\"\npath = \"A.lua\"\ndepends = [\"Ghost\"]"]);
    let a = simple_module("A");

    let err = build_in_memory(&manifest, &[("A.lua", a.as_str())]).unwrap_err();

    assert!(matches!(err, BundleError::UnknownDependency { .. }), "{err}");
}

/// CONTRACT: modules with `initialize = false` are mapped but never called.
#[test]
fn contract_initialize_opt_out_is_mapped_only() {
    let manifest = manifest(
        "block",
        &["name = \"Util\"\npath = \"Util.lua\"\ninitialize = false"],
    );
    let util = simple_module("Util");

    let text = build_in_memory(&manifest, &[("Util.lua", util.as_str())])
        .unwrap()
        .render();

    assert!(text.contains("local __modules = {\n\tUtil = Util,\n}"));
    assert!(!text.contains("__modules.Util:Initialize("));
}

/// CONTRACT: `[A, B, C]` with B depending on A and C a data payload.
#[test]
fn contract_abc_with_data_payload() {
    let manifest = manifest(
        "closure",
        &[
            "name = \"A\"\npath = \"A.lua\"",
            "name = \"B\"\npath = \"B.lua\"\ndepends = [\"A\"]",
            "name = \"C\"\npath = \"C.lua\"\nkind = \"data\"",
        ],
    );
    let a = simple_module("A");
    let b = "local B = {}\n\nfunction B:Initialize(deps)\n\tself.A = deps.A\nend\n\nreturn B\n";
    let c = "return { 1, 2, 3 }\n";

    let unit = build_in_memory(&manifest, &[("A.lua", a.as_str()), ("B.lua", b), ("C.lua", c)]).unwrap();

    assert_eq!(unit.segment_order(), vec!["A", "B", "C"]);
    assert!(unit.segments[2].text.ends_with("\nC = { 1, 2, 3 }"));
    assert!(!unit.segments[2].text.contains("function()"));
    assert!(unit
        .init_segment
        .contains("__modules.B:Initialize({\n\tA = __modules.A,\n})"));
    assert!(!unit.init_segment.contains("__modules.C:Initialize"));

    let text = unit.render();
    assert_eq!(text.matches("local Kit").count(), 1);
}

/// CONTRACT: an API require bound under a module's name still sees the
/// module when its exported symbol differs.
#[test]
fn contract_api_require_follows_exported_symbol() {
    for strategy in ["closure", "global", "block"] {
        let manifest = manifest(
            strategy,
            &["name = \"Theme\"\npath = \"Theme.lua\"\nsymbol = \"ThemeModule\"\ninitialize = false"],
        )
        .replace("[bundle]\n", "[bundle]\napi = \"init.lua\"\n");
        let api = "local Theme = require(script.Theme)\nKit.Theme = Theme\n\nreturn Kit\n";

        let text = build_in_memory(
            &manifest,
            &[
                ("Theme.lua", "local ThemeModule = {}\nreturn ThemeModule\n"),
                ("init.lua", api),
            ],
        )
        .unwrap_or_else(|e| panic!("{strategy}: {e}"))
        .render();

        assert!(text.contains("local Theme = ThemeModule\nKit.Theme = Theme"), "{strategy}:\n{text}");
        assert!(!text.contains("require("), "{strategy}");
    }
}
