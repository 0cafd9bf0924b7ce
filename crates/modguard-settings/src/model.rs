use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The only accepted value of the config's `schema` key.
pub const SCHEMA_CONFIG_V1: &str = "modguard.config.v1";

/// `.modguard.toml` / `.gomodguard.yaml` schema v1.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModguardConfigV1 {
    /// Optional; when present it must be [`SCHEMA_CONFIG_V1`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default)]
    pub allowed: AllowedConfig,

    #[serde(default)]
    pub blocked: BlockedConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AllowedConfig {
    /// Exact module paths (case-insensitive).
    #[serde(default)]
    pub modules: Vec<String>,

    /// Module path prefixes, e.g. `golang.org`.
    #[serde(default)]
    pub domains: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockedConfig {
    /// Each entry maps exactly one module path to its rule.
    #[serde(default)]
    pub modules: Vec<BTreeMap<String, BlockedModuleConfig>>,

    /// Each entry maps exactly one module path to its rule.
    #[serde(default)]
    pub versions: Vec<BTreeMap<String, BlockedVersionConfig>>,

    #[serde(
        default,
        rename = "localReplaceDirectives",
        alias = "local_replace_directives"
    )]
    pub local_replace_directives: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockedModuleConfig {
    #[serde(default)]
    pub recommendations: Vec<String>,

    #[serde(default)]
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockedVersionConfig {
    /// Version constraint, e.g. `<= 1.1.0`.
    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub reason: String,
}
