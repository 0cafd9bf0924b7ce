//! Fuzz target for Go import extraction.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_go_imports
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = modguard_repo::fuzz::extract_imports(text);
    }
});
