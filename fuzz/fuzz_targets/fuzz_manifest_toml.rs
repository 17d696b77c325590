#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use monolink::config::parse_with_warnings;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Manifest parsing and registry validation should never panic
        if let Ok((config, _)) = parse_with_warnings(content, Path::new("bundle.toml")) {
            let _ = config.registry();
            let _ = config.environment();
            let _ = config.linker();
        }
    }
});
