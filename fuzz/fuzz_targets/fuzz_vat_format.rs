#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic on any input, including multi-byte characters
        // around the country-prefix split.
        let _ = grenzvat::lookup::validate_vat_format(s);
    }
});
