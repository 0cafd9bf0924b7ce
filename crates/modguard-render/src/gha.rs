use crate::RenderableReport;

/// Render issues as GitHub Actions workflow command annotations.
///
/// Format:
/// `::error file={path},line={line}::{message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    report
        .issues
        .iter()
        .map(|i| {
            let mut meta = format!("file={}", i.file);
            if i.line > 0 {
                meta.push_str(&format!(",line={},col=1", i.line));
            }
            let message = format!("[{}:{}] {}", i.check_id, i.code, i.reason)
                .replace('%', "%25")
                .replace('\r', "%0D")
                .replace('\n', "%0A");
            format!("::error {meta}::{message}")
        })
        .collect()
}
