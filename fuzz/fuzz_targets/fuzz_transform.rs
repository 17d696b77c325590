#![no_main]

use libfuzzer_sys::fuzz_target;
use monolink::domain::services::Transformer;
use monolink::domain::value_objects::ContainerForm;

fuzz_target!(|data: &[u8]| {
    if let Ok(src) = std::str::from_utf8(data) {
        // Transforming arbitrary text must error or succeed, never panic
        for form in [ContainerForm::Local, ContainerForm::Global] {
            let _ = Transformer::new(form).transform_source("Fuzz", "Fuzz", src);
        }
    }
});
