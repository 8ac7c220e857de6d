#![no_main]
use libfuzzer_sys::fuzz_target;
use price_list::view_state::{QueryString, ViewState};

/// Fuzz shared view state decoding.
///
/// Query strings and state values come from untrusted links, so both the
/// query parser and the JSON decoding must reject garbage without panicking.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let query = QueryString::parse(s);
        let _ = ViewState::read_from(&query, "items");
        if let Some(state) = ViewState::from_query_value(s) {
            let _ = ViewState::from_query_value(&state.to_query_value());
        }
    }
});
