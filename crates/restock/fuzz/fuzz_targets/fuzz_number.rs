//! Fuzz target for locale-aware number parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use restock::normalize::{NumberParser, ParsedNumber, PlainNumberParser, parse_localized_number};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for parsed in [parse_localized_number(s), PlainNumberParser.parse(s)] {
            if let ParsedNumber::Value(v) = parsed {
                assert!(v.is_finite());
            }
        }
    }
});
