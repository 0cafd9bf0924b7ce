//! Resolve a policy against a `go.mod` into the set of blocked modules.

use crate::model::ModuleManifest;
use crate::policy::{BlockedModule, BlockedVersion, Configuration, PolicyError};
use crate::version::VersionError;
use modguard_types::ids;

/// Why a module is blocked. Rendered to text only at report time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockCause {
    LocalReplace,
    Version {
        rule: BlockedVersion,
        actual: String,
    },
    InvalidConstraint {
        error: VersionError,
    },
    NotAllowed,
    Module {
        rule: BlockedModule,
    },
}

impl BlockCause {
    pub fn code(&self) -> &'static str {
        match self {
            BlockCause::LocalReplace => ids::CODE_LOCAL_REPLACE,
            BlockCause::Version { .. } => ids::CODE_BLOCKED_VERSION,
            BlockCause::InvalidConstraint { .. } => ids::CODE_INVALID_VERSION_CONSTRAINT,
            BlockCause::NotAllowed => ids::CODE_NOT_ALLOWED,
            BlockCause::Module { .. } => ids::CODE_BLOCKED_MODULE,
        }
    }

    /// Reason text for an import of `import`.
    pub fn describe(&self, import: &str) -> String {
        let lead = format!("import of package `{import}` is blocked because");
        match self {
            BlockCause::LocalReplace => {
                format!("{lead} the module has a local replace directive.")
            }
            BlockCause::Version { rule, actual } => format!(
                "{lead} the module is in the blocked modules list. {}",
                rule.message(actual)
            ),
            BlockCause::InvalidConstraint { error } => {
                format!("{lead} the version constraint is invalid: `{error}`.")
            }
            BlockCause::NotAllowed => {
                format!("{lead} the module is not in the allowed modules list.")
            }
            BlockCause::Module { rule } => {
                let message = rule.message();
                if message.is_empty() {
                    format!("{lead} the module is in the blocked modules list.")
                } else {
                    format!("{lead} the module is in the blocked modules list. {message}")
                }
            }
        }
    }

    /// Reason with a literal `%s` where the import path goes.
    pub fn template(&self) -> String {
        self.describe("%s")
    }
}

/// A direct requirement with at least one block cause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockedModuleEntry {
    pub module: String,
    pub version: String,
    pub causes: Vec<BlockCause>,
}

/// Blocked modules in manifest declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockedModuleSet {
    entries: Vec<BlockedModuleEntry>,
}

impl BlockedModuleSet {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockedModuleEntry> {
        self.entries.iter()
    }

    pub fn get(&self, module: &str) -> Option<&BlockedModuleEntry> {
        self.entries.iter().find(|e| e.module == module)
    }

    pub fn module_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.module.clone()).collect()
    }

    /// Reason templates for `module`, empty when it is not blocked.
    pub fn reasons(&self, module: &str) -> Vec<String> {
        self.get(module)
            .map(|e| e.causes.iter().map(BlockCause::template).collect())
            .unwrap_or_default()
    }

    fn insert(&mut self, module: &str, version: &str, causes: Vec<BlockCause>) {
        if causes.is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|e| e.module == module) {
            Some(entry) => entry.causes.extend(causes),
            None => self.entries.push(BlockedModuleEntry {
                module: module.to_string(),
                version: version.to_string(),
                causes,
            }),
        }
    }
}

/// Compute the blocked modules among the direct requirements of `manifest`.
///
/// Causes per module are ordered: local replace, version rule, not allow-listed,
/// blocked-module rule. Allow-listed modules are never blocked.
pub fn resolve(
    config: &Configuration,
    manifest: &ModuleManifest,
) -> Result<BlockedModuleSet, PolicyError> {
    config.validate()?;

    let current_module = manifest.module.as_deref().unwrap_or_default();
    let mut set = BlockedModuleSet::default();

    for requirement in manifest.direct_requirements() {
        let module = requirement.path.trim();
        if config.allowed.is_allowed(module) {
            continue;
        }

        let mut causes = Vec::new();

        if config.block_local_replace && manifest.local_replace_for(requirement).is_some() {
            causes.push(BlockCause::LocalReplace);
        }

        let version_rule = config.blocked_version(module);
        if let Some(rule) = version_rule {
            match rule.is_version_blocked(&requirement.version) {
                Ok(true) => causes.push(BlockCause::Version {
                    rule: rule.clone(),
                    actual: requirement.version.trim().to_string(),
                }),
                Ok(false) => {}
                Err(error) => causes.push(BlockCause::InvalidConstraint { error }),
            }
        }

        let module_rule = config.blocked_module(module);
        if !config.allowed.is_empty()
            && causes.is_empty()
            && version_rule.is_none()
            && module_rule.is_none()
        {
            causes.push(BlockCause::NotAllowed);
        }

        if let Some(rule) = module_rule
            && !rule.is_current_module_a_recommendation(current_module)
        {
            causes.push(BlockCause::Module { rule: rule.clone() });
        }

        set.insert(module, requirement.version.trim(), causes);
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Allowed;
    use crate::test_support::{blocked_module, blocked_version, manifest, replace, require};

    #[test]
    fn allow_list_scenario() {
        let config = Configuration {
            allowed: Allowed {
                modules: vec![
                    "gopkg.in/yaml.v2".to_string(),
                    "github.com/Masterminds/semver/v3".to_string(),
                ],
                domains: vec!["golang.org".to_string()],
            },
            blocked_modules: vec![
                blocked_module(
                    "github.com/uudashr/go-module",
                    &["golang.org/x/mod"],
                    "`mod` is the official go.mod parser library.",
                ),
                blocked_module(
                    "github.com/gofrs/uuid",
                    &["github.com/ryancurrah/gomodguard"],
                    "testing if module is not blocked when it is recommended.",
                ),
            ],
            blocked_versions: vec![blocked_version(
                "github.com/mitchellh/go-homedir",
                "<= 1.1.0",
                "testing if blocked version constraint works.",
            )],
            block_local_replace: true,
        };
        let manifest = manifest(
            "github.com/ryancurrah/gomodguard",
            vec![
                require("gopkg.in/yaml.v2", "v2.4.0"),
                require("github.com/uudashr/go-module", "v1.0.0"),
                require("github.com/gofrs/uuid", "v1.2.3"),
                require("github.com/mitchellh/go-homedir", "v1.0.0"),
                require("github.com/pkg/errors", "v0.9.1"),
                require("golang.org/x/mod", "v0.4.0"),
            ],
            vec![replace("github.com/gofrs/uuid", "/path/to/local/package")],
        );

        let set = resolve(&config, &manifest).expect("resolve");

        assert_eq!(
            set.module_names(),
            vec![
                "github.com/uudashr/go-module",
                "github.com/gofrs/uuid",
                "github.com/mitchellh/go-homedir",
                "github.com/pkg/errors",
            ]
        );
        assert_eq!(
            set.reasons("github.com/uudashr/go-module"),
            vec![
                "import of package `%s` is blocked because the module is in the blocked modules list. \
                 `golang.org/x/mod` is a recommended module. `mod` is the official go.mod parser library."
            ]
        );
        assert_eq!(
            set.reasons("github.com/gofrs/uuid"),
            vec!["import of package `%s` is blocked because the module has a local replace directive."]
        );
        assert_eq!(
            set.reasons("github.com/mitchellh/go-homedir"),
            vec![
                "import of package `%s` is blocked because the module is in the blocked modules list. \
                 version `v1.0.0` is blocked because it does not meet the version constraint `<= 1.1.0`. \
                 testing if blocked version constraint works."
            ]
        );
        assert_eq!(
            set.reasons("github.com/pkg/errors"),
            vec!["import of package `%s` is blocked because the module is not in the allowed modules list."]
        );
    }

    #[test]
    fn without_allow_list_only_rules_block() {
        let config = Configuration {
            blocked_modules: vec![blocked_module(
                "gotest.tools/v3",
                &["github.com/stretchr/testify/assert"],
                "We have standardized on `github.com/stretchr/testify/assert`.",
            )],
            ..Configuration::default()
        };
        let manifest = manifest(
            "github.com/ryancurrah/gomodguard",
            vec![
                require("gotest.tools/v3", "v3.4.0"),
                require("github.com/pkg/errors", "v0.9.1"),
            ],
            vec![],
        );

        let set = resolve(&config, &manifest).expect("resolve");
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.reasons("gotest.tools/v3"),
            vec![
                "import of package `%s` is blocked because the module is in the blocked modules list. \
                 `github.com/stretchr/testify/assert` is a recommended module. \
                 We have standardized on `github.com/stretchr/testify/assert`."
            ]
        );
    }

    #[test]
    fn invalid_constraint_becomes_a_reason() {
        let config = Configuration {
            blocked_versions: vec![blocked_version("github.com/gin-gonic/gin", "== 1.0.0", "")],
            ..Configuration::default()
        };
        let manifest = manifest(
            "github.com/ryancurrah/gomodguard",
            vec![require("github.com/gin-gonic/gin", "v1.0.0")],
            vec![],
        );

        let set = resolve(&config, &manifest).expect("resolve");
        assert_eq!(
            set.reasons("github.com/gin-gonic/gin"),
            vec![
                "import of package `%s` is blocked because the version constraint is invalid: \
                 `improper constraint: == 1.0.0`."
            ]
        );
        let entry = set.get("github.com/gin-gonic/gin").expect("entry");
        assert_eq!(entry.causes[0].code(), ids::CODE_INVALID_VERSION_CONSTRAINT);
    }

    #[test]
    fn causes_follow_fixed_order() {
        let config = Configuration {
            blocked_modules: vec![blocked_module("github.com/acme/lib", &[], "No.")],
            blocked_versions: vec![blocked_version("github.com/acme/lib", "< 2", "")],
            block_local_replace: true,
            ..Configuration::default()
        };
        let manifest = manifest(
            "example.com/app",
            vec![require("github.com/acme/lib", "v1.4.0")],
            vec![replace("github.com/acme/lib", "../lib")],
        );

        let set = resolve(&config, &manifest).expect("resolve");
        let codes: Vec<&str> = set
            .get("github.com/acme/lib")
            .expect("entry")
            .causes
            .iter()
            .map(BlockCause::code)
            .collect();
        assert_eq!(
            codes,
            vec![
                ids::CODE_LOCAL_REPLACE,
                ids::CODE_BLOCKED_VERSION,
                ids::CODE_BLOCKED_MODULE
            ]
        );
    }

    #[test]
    fn allowed_wins_over_block_rules() {
        let config = Configuration {
            allowed: Allowed {
                modules: vec!["github.com/acme/lib".to_string()],
                domains: vec![],
            },
            blocked_modules: vec![blocked_module("github.com/acme/lib", &[], "No.")],
            blocked_versions: vec![blocked_version("github.com/acme/lib", ">= 0", "")],
            block_local_replace: true,
        };
        let manifest = manifest(
            "example.com/app",
            vec![require("github.com/acme/lib", "v1.4.0")],
            vec![replace("github.com/acme/lib", "../lib")],
        );

        assert!(resolve(&config, &manifest).expect("resolve").is_empty());
    }

    #[test]
    fn unsatisfied_version_rule_suppresses_not_allowed() {
        let config = Configuration {
            allowed: Allowed {
                modules: vec!["github.com/other/mod".to_string()],
                domains: vec![],
            },
            blocked_versions: vec![blocked_version("github.com/acme/lib", "< 1.0.0", "")],
            ..Configuration::default()
        };
        let manifest = manifest(
            "example.com/app",
            vec![require("github.com/acme/lib", "v1.4.0")],
            vec![],
        );

        assert!(resolve(&config, &manifest).expect("resolve").is_empty());
    }

    #[test]
    fn indirect_requirements_are_ignored() {
        let config = Configuration {
            blocked_modules: vec![blocked_module("github.com/acme/lib", &[], "No.")],
            ..Configuration::default()
        };
        let mut req = require("github.com/acme/lib", "v1.4.0");
        req.indirect = true;
        let manifest = manifest("example.com/app", vec![req], vec![]);

        assert!(resolve(&config, &manifest).expect("resolve").is_empty());
    }

    #[test]
    fn remote_replace_is_not_local() {
        let config = Configuration {
            block_local_replace: true,
            ..Configuration::default()
        };
        let mut remote = replace("github.com/acme/lib", "github.com/fork/lib");
        remote.new_version = Some("v1.5.0".to_string());
        let manifest = manifest(
            "example.com/app",
            vec![require("github.com/acme/lib", "v1.4.0")],
            vec![remote],
        );

        assert!(resolve(&config, &manifest).expect("resolve").is_empty());
    }

    #[test]
    fn malformed_rule_is_an_error() {
        let config = Configuration {
            blocked_modules: vec![blocked_module("", &[], "")],
            ..Configuration::default()
        };
        let manifest = manifest("example.com/app", vec![], vec![]);
        assert!(matches!(
            resolve(&config, &manifest),
            Err(PolicyError::EmptyModulePath { .. })
        ));
    }

    #[test]
    fn rendered_reason_substitutes_import() {
        let cause = BlockCause::NotAllowed;
        assert_eq!(
            cause.describe("github.com/pkg/errors"),
            "import of package `github.com/pkg/errors` is blocked because the module is not in the allowed modules list."
        );
        let bare = BlockCause::Module {
            rule: blocked_module("github.com/acme/lib", &[], ""),
        };
        assert_eq!(
            bare.describe("github.com/acme/lib"),
            "import of package `github.com/acme/lib` is blocked because the module is in the blocked modules list."
        );
    }
}
