//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Module path containment across major-version suffixes
//! - Determinism of resolution
//! - Allow-list precedence over block rules

use crate::classify::classify;
use crate::model::ModuleManifest;
use crate::path_match::{is_package_in_module, split_path_version};
use crate::policy::{Allowed, Configuration};
use crate::resolve::resolve;
use crate::test_support::{blocked_module, blocked_version, manifest, replace, require};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Module base paths that share prefixes with each other.
fn arb_base() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("github.com/aws/aws-sdk-go".to_string()),
        Just("github.com/aws/aws-sdk-go-v2".to_string()),
        Just("github.com/foo/bar".to_string()),
        Just("github.com/foo/barista".to_string()),
        Just("github.com/foo/bar/v".to_string()),
        prop::string::string_regex("[a-z]{1,8}\\.(com|org|io)/[a-uw-z][a-z0-9-]{0,10}").unwrap(),
    ]
}

fn arb_subpath() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::string::string_regex("[a-uw-z][a-z0-9_]{0,8}").unwrap(), 0..3)
        .prop_map(|segments| segments.join("/"))
}

fn arb_requirement_path() -> impl Strategy<Value = String> {
    (arb_base(), prop::option::of(2u64..100)).prop_map(|(base, major)| match major {
        Some(n) => format!("{base}/v{n}"),
        None => base,
    })
}

fn arb_manifest() -> impl Strategy<Value = ModuleManifest> {
    prop::collection::vec((arb_requirement_path(), 0u64..5, 0u64..20), 0..8).prop_map(|reqs| {
        let requirements = reqs
            .iter()
            .map(|(path, minor, patch)| require(path, &format!("v1.{minor}.{patch}")))
            .collect();
        let replaces = reqs
            .iter()
            .take(1)
            .map(|(path, _, _)| replace(path, "../local"))
            .collect();
        manifest("example.com/app", requirements, replaces)
    })
}

fn arb_config(paths: Vec<String>) -> impl Strategy<Value = Configuration> {
    let n = paths.len().max(1);
    (
        prop::collection::vec(0..n, 0..4),
        prop::collection::vec(0..n, 0..4),
        prop::collection::vec(0..n, 0..3),
        any::<bool>(),
    )
        .prop_map(move |(blocked, versions, allowed, local)| {
            let pick = |i: usize| paths.get(i).cloned().unwrap_or_default();
            Configuration {
                allowed: Allowed {
                    modules: allowed.into_iter().map(pick).filter(|p| !p.is_empty()).collect(),
                    domains: vec![],
                },
                blocked_modules: blocked
                    .into_iter()
                    .map(pick)
                    .filter(|p| !p.is_empty())
                    .map(|p| blocked_module(&p, &["example.com/other"], "No."))
                    .collect(),
                blocked_versions: versions
                    .into_iter()
                    .map(pick)
                    .filter(|p| !p.is_empty())
                    .map(|p| blocked_version(&p, "< 1.3", ""))
                    .collect(),
                block_local_replace: local,
            }
        })
}

fn arb_case() -> impl Strategy<Value = (ModuleManifest, Configuration)> {
    arb_manifest().prop_flat_map(|m| {
        let paths = m.requirements.iter().map(|r| r.path.clone()).collect();
        (Just(m), arb_config(paths))
    })
}

// ============================================================================
// Path matching
// ============================================================================

proptest! {
    #[test]
    fn module_contains_itself_and_its_subpackages(base in arb_base(), sub in arb_subpath()) {
        prop_assert!(is_package_in_module(&base, &base));
        if !sub.is_empty() {
            let pkg = format!("{base}/{sub}");
            prop_assert!(is_package_in_module(&pkg, &base));
        }
    }

    #[test]
    fn unversioned_module_never_contains_a_major_version(
        base in arb_base(),
        major in 2u64..100,
        sub in arb_subpath(),
    ) {
        let mut pkg = format!("{base}/v{major}");
        if !sub.is_empty() {
            pkg = format!("{pkg}/{sub}");
        }
        prop_assert!(!is_package_in_module(&pkg, &base));
    }

    #[test]
    fn versioned_modules_do_not_contain_each_other(
        base in arb_base(),
        a in 2u64..100,
        b in 2u64..100,
        sub in arb_subpath(),
    ) {
        let module = format!("{base}/v{a}");
        let pkg = if sub.is_empty() {
            format!("{base}/v{b}")
        } else {
            format!("{base}/v{b}/{sub}")
        };
        prop_assert_eq!(is_package_in_module(&pkg, &module), a == b);
        prop_assert!(!is_package_in_module(&base, &module));
    }

    #[test]
    fn string_prefix_without_segment_boundary_never_matches(
        base in arb_base(),
        tail in "[a-z0-9-]{1,6}",
    ) {
        let pkg = format!("{base}{tail}");
        prop_assert!(!is_package_in_module(&pkg, &base));
    }

    #[test]
    fn split_path_version_round_trips(base in arb_base(), major in 2u64..100) {
        let module = format!("{base}/v{major}");
        prop_assert_eq!(split_path_version(&module), (base.as_str(), Some(major)));
    }
}

// ============================================================================
// Resolution
// ============================================================================

proptest! {
    #[test]
    fn resolve_is_deterministic((m, cfg) in arb_case()) {
        let first = resolve(&cfg, &m).expect("resolve");
        let second = resolve(&cfg, &m).expect("resolve");
        prop_assert_eq!(&first, &second);

        let templates = |set: &crate::resolve::BlockedModuleSet| -> Vec<Vec<String>> {
            set.iter().map(|e| set.reasons(&e.module)).collect()
        };
        prop_assert_eq!(templates(&first), templates(&second));
    }

    #[test]
    fn allowed_modules_are_never_blocked((m, cfg) in arb_case()) {
        let set = resolve(&cfg, &m).expect("resolve");
        for module in &cfg.allowed.modules {
            prop_assert!(set.get(module).is_none(), "allowed module {} was blocked", module);
        }
    }

    #[test]
    fn every_template_has_a_placeholder((m, cfg) in arb_case()) {
        let set = resolve(&cfg, &m).expect("resolve");
        for entry in set.iter() {
            prop_assert!(!entry.causes.is_empty());
            for template in set.reasons(&entry.module) {
                prop_assert!(template.contains("%s"));
            }
        }
    }

    #[test]
    fn blocked_module_blocks_its_own_path((m, cfg) in arb_case()) {
        let set = resolve(&cfg, &m).expect("resolve");
        for entry in set.iter() {
            prop_assert!(!classify(&entry.module, &set).is_empty());
        }
    }
}
