//! Policy rules: the allow-list, blocked modules and blocked versions.

use crate::version::{self, VersionError};

/// Modules and domains exempt from every block rule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Allowed {
    pub modules: Vec<String>,
    pub domains: Vec<String>,
}

impl Allowed {
    pub fn is_allowed_module(&self, module: &str) -> bool {
        self.modules.iter().any(|m| m.eq_ignore_ascii_case(module))
    }

    pub fn is_allowed_module_domain(&self, module: &str) -> bool {
        let module = module.to_ascii_lowercase();
        self.domains
            .iter()
            .any(|d| module.starts_with(&d.to_ascii_lowercase()))
    }

    pub fn is_allowed(&self, module: &str) -> bool {
        self.is_allowed_module_domain(module) || self.is_allowed_module(module)
    }

    /// No allow rules at all: nothing is blocked for being unlisted.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.domains.is_empty()
    }
}

/// A module that must not be used, with suggested replacements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockedModule {
    pub module: String,
    pub recommendations: Vec<String>,
    pub reason: String,
}

impl BlockedModule {
    /// "`a`, `b` and `c` are recommended modules. <reason>"
    pub fn message(&self) -> String {
        let quoted: Vec<String> = self
            .recommendations
            .iter()
            .map(|r| format!("`{r}`"))
            .collect();
        let lead = match quoted.as_slice() {
            [] => String::new(),
            [one] => format!("{one} is a recommended module."),
            [init @ .., last] => {
                format!("{} and {last} are recommended modules.", init.join(", "))
            }
        };
        join_sentences(&lead, &self.reason)
    }

    pub fn has_recommendations(&self) -> bool {
        !self.recommendations.is_empty()
    }

    /// A project may depend on a module it is itself recommended over.
    pub fn is_current_module_a_recommendation(&self, current_module: &str) -> bool {
        !current_module.is_empty()
            && self
                .recommendations
                .iter()
                .any(|r| r.trim().eq_ignore_ascii_case(current_module))
    }
}

/// A version constraint on a module: versions inside the constraint are blocked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockedVersion {
    pub module: String,
    /// Constraint expression, e.g. `<= 1.1.0`.
    pub version: String,
    pub reason: String,
}

impl BlockedVersion {
    pub fn message(&self, actual: &str) -> String {
        let head = format!(
            "version `{actual}` is blocked because it does not meet the version constraint `{}`.",
            self.version
        );
        join_sentences(&head, &self.reason)
    }

    /// An empty constraint blocks nothing.
    pub fn is_version_blocked(&self, actual: &str) -> Result<bool, VersionError> {
        let constraint = self.version.trim();
        if constraint.is_empty() {
            return Ok(false);
        }
        version::satisfies(constraint, actual.trim())
    }
}

/// The full policy for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Configuration {
    pub allowed: Allowed,
    /// In declaration order; the first rule for a module wins.
    pub blocked_modules: Vec<BlockedModule>,
    /// In declaration order; the first rule for a module wins.
    pub blocked_versions: Vec<BlockedVersion>,
    pub block_local_replace: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("blocked.{section} entry #{index} has an empty module path")]
    EmptyModulePath { section: &'static str, index: usize },
}

impl Configuration {
    pub fn blocked_module(&self, module: &str) -> Option<&BlockedModule> {
        self.blocked_modules
            .iter()
            .find(|b| b.module.trim().eq_ignore_ascii_case(module))
    }

    pub fn blocked_version(&self, module: &str) -> Option<&BlockedVersion> {
        self.blocked_versions
            .iter()
            .find(|b| b.module.trim().eq_ignore_ascii_case(module))
    }

    /// Whether any rule can block anything.
    pub fn has_rules(&self) -> bool {
        !self.allowed.is_empty()
            || !self.blocked_modules.is_empty()
            || !self.blocked_versions.is_empty()
            || self.block_local_replace
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        let modules = self.blocked_modules.iter().map(|b| b.module.as_str());
        let versions = self.blocked_versions.iter().map(|b| b.module.as_str());
        check_module_paths("modules", modules)?;
        check_module_paths("versions", versions)
    }
}

fn check_module_paths<'a>(
    section: &'static str,
    modules: impl Iterator<Item = &'a str>,
) -> Result<(), PolicyError> {
    for (index, module) in modules.enumerate() {
        if module.trim().is_empty() {
            return Err(PolicyError::EmptyModulePath { section, index });
        }
    }
    Ok(())
}

fn join_sentences(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.trim().is_empty()) {
        (_, true) => head.to_string(),
        (true, false) => tail.trim().to_string(),
        (false, false) => format!("{head} {}", tail.trim()),
    }
}
