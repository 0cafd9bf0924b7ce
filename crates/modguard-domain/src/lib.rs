//! Pure policy evaluation (no IO).
//!
//! Input: a parsed `go.mod`, a policy configuration and the imports of each source file,
//! all constructed elsewhere.
//! Output: the blocked-module set and the issues found.

#![forbid(unsafe_code)]

pub mod classify;
pub mod model;
pub mod path_match;
pub mod policy;
pub mod report;
pub mod resolve;
pub mod version;

mod engine;
mod fingerprint;

pub use classify::classify;
pub use engine::{evaluate, process_files};
pub use path_match::is_package_in_module;
pub use policy::{Allowed, BlockedModule, BlockedVersion, Configuration, PolicyError};
pub use report::DomainReport;
pub use resolve::{resolve, BlockCause, BlockedModuleEntry, BlockedModuleSet};
pub use version::{satisfies, VersionError};

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
