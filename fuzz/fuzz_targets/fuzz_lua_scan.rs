#![no_main]

use libfuzzer_sys::fuzz_target;
use monolink::domain::services::lua_scan;

fuzz_target!(|data: &[u8]| {
    if let Ok(src) = std::str::from_utf8(data) {
        // Scanning arbitrary text must never panic
        let scan = lua_scan::scan(src);
        let _ = scan.bindings();
        let _ = lua_scan::strip_comment_lines(src);
    }
});
