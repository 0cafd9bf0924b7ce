//! Match one import path against the blocked-module set.

use crate::path_match::is_package_in_module;
use crate::resolve::{BlockCause, BlockedModuleEntry, BlockedModuleSet};

/// Every `(module, cause)` pair that blocks `import`, in set order.
pub fn blocking_causes<'a>(
    import: &'a str,
    set: &'a BlockedModuleSet,
) -> impl Iterator<Item = (&'a BlockedModuleEntry, &'a BlockCause)> + 'a {
    set.iter()
        .filter(move |entry| is_package_in_module(import, &entry.module))
        .flat_map(|entry| entry.causes.iter().map(move |cause| (entry, cause)))
}

/// Rendered reasons blocking `import`; empty when the import is fine.
pub fn classify(import: &str, set: &BlockedModuleSet) -> Vec<String> {
    blocking_causes(import, set)
        .map(|(_, cause)| cause.describe(import))
        .collect()
}
