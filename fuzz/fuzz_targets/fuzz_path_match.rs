//! Fuzz target for package-in-module matching.
//!
//! Besides not panicking, a module always contains itself and its own subpackages.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_path_match
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use modguard_domain::is_package_in_module;

#[derive(Arbitrary, Debug)]
struct PathInput {
    package: String,
    module: String,
}

fuzz_target!(|input: PathInput| {
    if input.package.len() > 512 || input.module.len() > 512 {
        return;
    }

    let _ = is_package_in_module(&input.package, &input.module);

    if !input.module.is_empty() {
        assert!(is_package_in_module(&input.module, &input.module));
    }
});
