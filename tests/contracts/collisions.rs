//! Contracts for the shared top-level namespace.

use monolink::BundleError;

use crate::common::*;

/// CONTRACT: two modules leaking the same global cannot both be linked.
#[test]
fn contract_leaked_globals_collide() {
    let manifest = manifest(
        "block",
        &["name = \"A\"\npath = \"A.lua\"", "name = \"B\"\npath = \"B.lua\""],
    );

    let err = build_in_memory(
        &manifest,
        &[
            ("A.lua", "local A = {}\nShared = 1\nreturn A\n"),
            ("B.lua", "local B = {}\nShared = 2\nreturn B\n"),
        ],
    )
    .unwrap_err();

    match err {
        BundleError::SymbolCollision {
            symbol,
            first,
            second,
        } => {
            assert_eq!(symbol, "Shared");
            assert_eq!(first, "A");
            assert_eq!(second, "B");
        }
        other => panic!("expected a collision, got {other}"),
    }
}

/// CONTRACT: block scoping keeps helper locals out of the shared namespace.
#[test]
fn contract_block_scope_isolates_locals() {
    let manifest = manifest(
        "block",
        &["name = \"A\"\npath = \"A.lua\"", "name = \"B\"\npath = \"B.lua\""],
    );
    let a = "local helper = 1\nlocal A = {}\nreturn A\n";
    let b = "local helper = 2\nlocal B = {}\nreturn B\n";

    assert!(build_in_memory(&manifest, &[("A.lua", a), ("B.lua", b)]).is_ok());

    let promoted = manifest.replace("strategy = \"block\"", "strategy = \"global\"");
    let err = build_in_memory(&promoted, &[("A.lua", a), ("B.lua", b)]).unwrap_err();
    assert!(
        matches!(&err, BundleError::SymbolCollision { symbol, .. } if symbol == "helper"),
        "{err}"
    );
}

/// CONTRACT: a module cannot take the dependency-map table's name.
#[test]
fn contract_linker_table_is_reserved() {
    let manifest = manifest("block", &["name = \"A\"\npath = \"A.lua\""]);

    let err = build_in_memory(
        &manifest,
        &[("A.lua", "local A = {}\n__modules = {}\nreturn A\n")],
    )
    .unwrap_err();

    assert!(
        matches!(&err, BundleError::SymbolCollision { first, .. } if first == "<linker>"),
        "{err}"
    );
}
