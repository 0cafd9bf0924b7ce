//! Fuzz target for the `go.mod` parser.
//!
//! The parser should **never panic**; malformed input must come back as an error.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_gomod_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = modguard_repo::fuzz::parse_go_mod(text);
    }
});
