//! Contracts for data payload modules.

use crate::common::*;

const PALETTE: &str = r##"-- palette generated from tokens.json
local palette = {
	-- primary
	primary = "#3b82f6",
	note = [[
-- not a comment
]],
}

return palette
"##;

/// CONTRACT: a data payload is emitted byte-for-byte, comment lines included.
#[test]
fn contract_data_payload_is_verbatim() {
    for strategy in ["closure", "global", "block"] {
        let manifest = manifest(
            strategy,
            &["name = \"Palette\"\npath = \"Palette.lua\"\nkind = \"data\""],
        );

        let text = build_in_memory(&manifest, &[("Palette.lua", PALETTE)])
            .unwrap()
            .render();

        assert!(
            text.contains(
                "Palette = {\n\t-- primary\n\tprimary = \"#3b82f6\",\n\tnote = [[\n-- not a comment\n]],\n}"
            ),
            "{strategy}:\n{text}"
        );
        assert!(!text.contains("palette generated"));
        assert!(!text.contains("Palette:Initialize"));
    }
}
