//! Config parsing and policy resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{
    AllowedConfig, BlockedConfig, BlockedModuleConfig, BlockedVersionConfig, ModguardConfigV1,
    SCHEMA_CONFIG_V1,
};
pub use resolve::resolve_config;

/// Config file names searched for, in priority order.
pub const CONFIG_FILE_NAMES: &[&str] = &[".modguard.toml", ".gomodguard.yaml", ".gomodguard.yml"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// `.yaml`/`.yml` files are YAML; everything else is TOML.
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            ConfigFormat::Yaml
        } else {
            ConfigFormat::Toml
        }
    }
}

/// Parse a config document into the typed model.
pub fn parse_config(input: &str, format: ConfigFormat) -> anyhow::Result<ModguardConfigV1> {
    let cfg = match format {
        ConfigFormat::Toml => toml::from_str(input)?,
        ConfigFormat::Yaml if input.trim().is_empty() => ModguardConfigV1::default(),
        ConfigFormat::Yaml => serde_yaml::from_str(input)?,
    };
    Ok(cfg)
}
