//! Render use cases over in-memory reports.

use modguard_render::RenderableReport;

/// One `file:line:1 reason` line per issue.
pub fn render_text(report: &RenderableReport) -> Vec<String> {
    modguard_render::render_text(report)
}

pub fn render_checkstyle(report: &RenderableReport) -> String {
    modguard_render::render_checkstyle(report)
}

pub fn render_markdown(report: &RenderableReport) -> String {
    modguard_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    modguard_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}
