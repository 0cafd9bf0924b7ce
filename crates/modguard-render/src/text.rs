use crate::RenderableReport;

/// One `file:line:1 reason` line per issue.
pub fn render_text(report: &RenderableReport) -> Vec<String> {
    report
        .issues
        .iter()
        .map(|i| format!("{}:{}:1 {}", i.file, i.line, i.reason))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{issue, report};

    #[test]
    fn one_line_per_issue() {
        let r = report(vec![
            issue("main.go", 6, "not_allowed", "blocked"),
            issue("broken.go", 0, "invalid_syntax", "invalid syntax"),
        ]);
        assert_eq!(
            render_text(&r),
            vec!["main.go:6:1 blocked", "broken.go:0:1 invalid syntax"]
        );
        assert!(render_text(&report(vec![])).is_empty());
    }
}
