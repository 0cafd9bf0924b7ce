//! The `check` use case: resolve the policy against `go.mod` and lint Go imports.

use anyhow::Context;
use camino::Utf8Path;
use modguard_domain::{BlockedModuleSet, Configuration};
use modguard_settings::ConfigFormat;
use modguard_types::{ModguardReport, ReportEnvelope, ToolMeta, Verdict, SCHEMA_REPORT_V1};
use time::OffsetDateTime;
use tracing::{debug, info};

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Directory holding `go.mod`; targets and reported paths are relative to it.
    pub work_dir: &'a Utf8Path,
    /// Config file contents.
    pub config_text: &'a str,
    pub config_format: ConfigFormat,
    /// Files, directories or `dir/...` patterns. Empty means `./...`.
    pub targets: &'a [String],
    /// Skip `_test.go` files.
    pub skip_tests: bool,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: ModguardReport,
    /// The resolved policy used.
    pub configuration: Configuration,
    pub blocked: BlockedModuleSet,
}

/// Run the check use case: parse config, read `go.mod`, resolve, lint sources, produce report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let cfg = modguard_settings::parse_config(input.config_text, input.config_format)
        .context("parse config")?;
    let configuration = modguard_settings::resolve_config(cfg).context("resolve config")?;
    log_policy(&configuration);

    let manifest = modguard_repo::load_manifest(input.work_dir).context("load go.mod")?;
    let blocked =
        modguard_domain::resolve(&configuration, &manifest).context("resolve blocked modules")?;
    info!(
        count = blocked.len(),
        modules = ?blocked.module_names(),
        "go.mod has blocked module(s)"
    );

    // Nothing can be reported when no module is blocked.
    let sources = if blocked.is_empty() {
        Vec::new()
    } else {
        let files =
            modguard_repo::find_go_files(input.work_dir, input.targets, input.skip_tests);
        debug!(files = files.len(), "linting go files");
        modguard_repo::load_sources(input.work_dir, &files).context("read go sources")?
    };

    let domain = modguard_domain::evaluate(&manifest, &blocked, &sources);
    info!(
        files = domain.data.files_scanned,
        issues = domain.data.issues_total,
        "lint finished"
    );

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "modguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict: domain.verdict,
        issues: domain.issues,
        data: domain.data,
    };

    Ok(CheckOutput {
        report,
        configuration,
        blocked,
    })
}

fn log_policy(cfg: &Configuration) {
    let blocked: Vec<&str> = cfg.blocked_modules.iter().map(|b| b.module.as_str()).collect();
    let versions: Vec<String> = cfg
        .blocked_versions
        .iter()
        .map(|v| format!("{} {}", v.module, v.version))
        .collect();
    info!(modules = ?cfg.allowed.modules, "allowed modules");
    info!(domains = ?cfg.allowed.domains, "allowed module domains");
    info!(modules = ?blocked, "blocked modules");
    info!(versions = ?versions, "blocked modules with version constraints");
    debug!(
        local_replace = cfg.block_local_replace,
        "blocked local replace directives"
    );
}

/// Map verdict to exit code: 0 = pass, `issues_exit_code` = issues found.
pub fn verdict_exit_code(verdict: Verdict, issues_exit_code: i32) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail => issues_exit_code,
    }
}
