use anyhow::Context;
use modguard_render::{RenderableData, RenderableIssue, RenderableReport, RenderableVerdictStatus};
use modguard_types::{
    ids, Issue, ModguardData, ModguardReport, RepoPath, ToolMeta, Verdict, SCHEMA_REPORT_V1,
};
use time::OffsetDateTime;

/// Parse a report previously written by `modguard check --report json`.
pub fn parse_report_json(text: &str) -> anyhow::Result<ModguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema}");
    }

    serde_json::from_value(value).context("parse modguard report")
}

pub fn serialize_report(report: &ModguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &ModguardReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        issues: report.issues.iter().map(renderable_issue).collect(),
        data: RenderableData {
            module: report.data.module.clone(),
            files_scanned: report.data.files_scanned,
            issues_total: report.data.issues_total,
        },
    }
}

fn renderable_issue(i: &Issue) -> RenderableIssue {
    RenderableIssue {
        file: i.file.as_str().to_string(),
        line: i.line,
        check_id: i.check_id.clone(),
        code: i.code.clone(),
        reason: i.reason.clone(),
    }
}

/// A failing report carrying a single `tool.runtime` issue.
pub fn runtime_error_report(message: &str) -> ModguardReport {
    let now = OffsetDateTime::now_utc();
    ModguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "modguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        issues: vec![Issue {
            file: RepoPath::new("go.mod"),
            line: 0,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            reason: message.to_string(),
            module: None,
            import_path: None,
            fingerprint: None,
        }],
        data: ModguardData {
            issues_total: 1,
            ..ModguardData::default()
        },
    }
}
