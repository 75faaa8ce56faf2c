//! Fuzz target for SKU and header normalization.
//!
//! Both must be idempotent on any input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use restock::{normalize_header, normalize_sku};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let sku = normalize_sku(s);
        assert_eq!(normalize_sku(sku.as_str()), sku);

        let header = normalize_header(s);
        assert!(!header.starts_with('_') && !header.ends_with('_'));
    }
});
