//! Contracts for the aggregate root (`bundle.name`).

use monolink::BundleError;

use crate::common::*;

const GREEDY: &str = r#"local Kit = {}
local Panel = {}

Kit.Panel = Panel

return Panel
"#;

/// CONTRACT: the root is declared exactly once, by the preamble.
#[test]
fn contract_root_declared_once() {
    for strategy in ["closure", "global", "block"] {
        let manifest = manifest(strategy, &["name = \"Panel\"\npath = \"Panel.lua\""]);

        let text = build_in_memory(&manifest, &[("Panel.lua", GREEDY)])
            .unwrap()
            .render();

        assert_eq!(
            text.matches("local Kit = {}").count(),
            1,
            "{strategy}:\n{text}"
        );
        assert!(text.contains("redeclaration of 'Kit' removed"));
        assert!(text.contains("Kit.Panel = Panel"));
    }
}

/// CONTRACT: the root stays the value returned by the unit.
#[test]
fn contract_unit_returns_root() {
    let manifest = manifest("block", &["name = \"Panel\"\npath = \"Panel.lua\""]);

    let unit = build_in_memory(&manifest, &[("Panel.lua", GREEDY)]).unwrap();

    assert_eq!(unit.final_export, "return Kit");
    assert!(unit.render().ends_with("\nreturn Kit\n"));
}

/// CONTRACT: no module may export the root's name.
#[test]
fn contract_module_symbol_cannot_shadow_root() {
    let manifest = manifest(
        "block",
        &["name = \"Core\"\npath = \"Core.lua\"\nsymbol = \"Kit\""],
    );

    let err = build_in_memory(&manifest, &[("Core.lua", "local Kit = {}\nreturn Kit\n")])
        .unwrap_err();

    assert!(
        matches!(&err, BundleError::SymbolCollision { symbol, .. } if symbol == "Kit"),
        "{err}"
    );
}

/// CONTRACT: an environment handle cannot take the root's name.
#[test]
fn contract_environment_handle_cannot_shadow_root() {
    let manifest = format!(
        "{}\n[[environment]]\nname = \"Kit\"\nvalue = \"game\"\n",
        manifest("block", &["name = \"Panel\"\npath = \"Panel.lua\""])
    );

    let err = build_in_memory(&manifest, &[("Panel.lua", GREEDY)]).unwrap_err();

    assert!(
        matches!(&err, BundleError::SymbolCollision { symbol, .. } if symbol == "Kit"),
        "{err}"
    );
}

/// CONTRACT: each preamble binding is declared once.
#[test]
fn contract_environment_handles_are_unique() {
    let manifest = format!(
        "{}\n[[environment]]\nname = \"P\"\nvalue = \"1\"\n\n[[environment]]\nname = \"P\"\nvalue = \"2\"\n",
        manifest("block", &["name = \"Panel\"\npath = \"Panel.lua\""])
    );

    let err = build_in_memory(&manifest, &[("Panel.lua", GREEDY)]).unwrap_err();

    assert!(
        matches!(&err, BundleError::SymbolCollision { symbol, .. } if symbol == "P"),
        "{err}"
    );
}

/// CONTRACT: neutralizing the root inside a shared assignment binds nothing
/// two modules could collide on.
#[test]
fn contract_shared_root_assignment_in_two_modules() {
    for strategy in ["closure", "global", "block"] {
        let manifest = manifest(
            strategy,
            &[
                "name = \"A\"\npath = \"A.lua\"\ninitialize = false",
                "name = \"B\"\npath = \"B.lua\"\ninitialize = false",
            ],
        );
        let a = "local A = {}\nKit, x = {}, 1\nreturn A\n";
        let b = "local B = {}\nKit, y = {}, 2\nreturn B\n";

        let text = build_in_memory(&manifest, &[("A.lua", a), ("B.lua", b)])
            .unwrap_or_else(|e| panic!("{strategy}: {e}"))
            .render();

        assert_eq!(text.matches("local Kit = {}").count(), 1, "{strategy}");
        assert!(text.contains("_, x = {}, 1"), "{strategy}:\n{text}");
        assert!(text.contains("_, y = {}, 2"), "{strategy}:\n{text}");
    }
}
