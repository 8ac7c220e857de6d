#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the product collection parser.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = price_list::parse_products(s);
    }
});
