use crate::model::{ModguardConfigV1, SCHEMA_CONFIG_V1};
use anyhow::Context;
use modguard_domain::{Allowed, BlockedModule, BlockedVersion, Configuration};
use std::collections::BTreeMap;

/// Turn the user-facing config into the policy the engine evaluates.
pub fn resolve_config(cfg: ModguardConfigV1) -> anyhow::Result<Configuration> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema.trim() != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema `{schema}` (expected `{SCHEMA_CONFIG_V1}`)");
    }

    let blocked_modules = single_entries("modules", cfg.blocked.modules)?
        .into_iter()
        .map(|(module, rule)| BlockedModule {
            module,
            recommendations: rule
                .recommendations
                .into_iter()
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect(),
            reason: rule.reason.trim().to_string(),
        })
        .collect();

    let blocked_versions = single_entries("versions", cfg.blocked.versions)?
        .into_iter()
        .map(|(module, rule)| BlockedVersion {
            module,
            version: rule.version.trim().to_string(),
            reason: rule.reason.trim().to_string(),
        })
        .collect();

    let configuration = Configuration {
        allowed: Allowed {
            modules: trimmed(cfg.allowed.modules),
            domains: trimmed(cfg.allowed.domains),
        },
        blocked_modules,
        blocked_versions,
        block_local_replace: cfg.blocked.local_replace_directives,
    };

    configuration
        .validate()
        .context("invalid blocked rule")?;
    Ok(configuration)
}

/// Flatten `[{module: rule}, ...]`, keeping declaration order.
fn single_entries<T>(
    section: &str,
    entries: Vec<BTreeMap<String, T>>,
) -> anyhow::Result<Vec<(String, T)>> {
    let mut out = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let found = entry.len();
        let mut iter = entry.into_iter();
        match (iter.next(), found) {
            (Some((module, rule)), 1) => out.push((module.trim().to_string(), rule)),
            _ => anyhow::bail!(
                "blocked.{section} entry #{index} must name exactly one module (found {found})"
            ),
        }
    }
    Ok(out)
}

fn trimmed(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigFormat, parse_config};

    fn resolve_toml(input: &str) -> anyhow::Result<Configuration> {
        resolve_config(parse_config(input, ConfigFormat::Toml)?)
    }

    #[test]
    fn rules_keep_declaration_order() {
        let cfg = resolve_toml(
            r#"
[[blocked.modules]]
"github.com/b/second" = { reason = "b" }

[[blocked.modules]]
"github.com/a/first" = { recommendations = [" github.com/c/alt "], reason = " a " }
"#,
        )
        .expect("resolve");

        let modules: Vec<&str> = cfg.blocked_modules.iter().map(|b| b.module.as_str()).collect();
        assert_eq!(modules, vec!["github.com/b/second", "github.com/a/first"]);
        assert_eq!(cfg.blocked_modules[1].recommendations, vec!["github.com/c/alt"]);
        assert_eq!(cfg.blocked_modules[1].reason, "a");
        assert!(!cfg.block_local_replace);
    }

    #[test]
    fn entries_must_name_exactly_one_module() {
        let err = resolve_toml(
            r#"
[[blocked.versions]]
"github.com/a/one" = { version = "< 1" }
"github.com/b/two" = { version = "< 2" }
"#,
        )
        .unwrap_err();
        assert!(
            err.to_string()
                .contains("blocked.versions entry #0 must name exactly one module (found 2)")
        );
    }

    #[test]
    fn empty_module_path_is_rejected() {
        let err = resolve_toml(
            r#"
[[blocked.modules]]
" " = { reason = "blank" }
"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("empty module path"));
    }

    #[test]
    fn invalid_constraint_is_not_a_config_error() {
        let cfg = resolve_toml(
            r#"
[[blocked.versions]]
"github.com/gin-gonic/gin" = { version = "== 1.0.0" }
"#,
        )
        .expect("resolve");
        assert_eq!(cfg.blocked_versions[0].version, "== 1.0.0");
    }

    #[test]
    fn schema_key_is_optional_but_checked() {
        let cfg = resolve_toml("schema = \"modguard.config.v1\"\n").expect("resolve");
        assert!(cfg.blocked_modules.is_empty());

        let err = resolve_toml("schema = \"modguard.config.v2\"\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported config schema `modguard.config.v2` (expected `modguard.config.v1`)"
        );

        let err = resolve_config(
            parse_config("schema: depguard.config.v1\n", ConfigFormat::Yaml).expect("parse"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("`depguard.config.v1`"));
    }

    #[test]
    fn allow_lists_are_trimmed() {
        let cfg = resolve_toml(
            r#"
[allowed]
modules = [" gopkg.in/yaml.v2 ", ""]
domains = ["golang.org"]
"#,
        )
        .expect("resolve");
        assert_eq!(cfg.allowed.modules, vec!["gopkg.in/yaml.v2"]);
        assert_eq!(cfg.allowed.domains, vec!["golang.org"]);
    }
}
