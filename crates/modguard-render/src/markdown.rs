use crate::{RenderableReport, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Modguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!("- Verdict: **{verdict}**\n"));
    if let Some(module) = &report.data.module {
        out.push_str(&format!("- Module: `{module}`\n"));
    }
    out.push_str(&format!(
        "- Files scanned: {}\n- Issues: {}\n\n",
        report.data.files_scanned, report.data.issues_total
    ));

    if report.issues.is_empty() {
        out.push_str("No issues.\n");
        return out;
    }

    out.push_str("## Issues\n\n");
    for i in &report.issues {
        out.push_str(&format!(
            "- `{}:{}` `{}` / `{}`: {}\n",
            i.file, i.line, i.check_id, i.code, i.reason
        ));
    }

    out
}
