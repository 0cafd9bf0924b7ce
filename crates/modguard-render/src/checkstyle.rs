use crate::RenderableReport;

/// Render issues as a Checkstyle XML document.
///
/// Files appear in the order their first issue does; every issue is an `error` at column 1.
pub fn render_checkstyle(report: &RenderableReport) -> String {
    let mut files: Vec<(&str, Vec<usize>)> = Vec::new();
    for (idx, issue) in report.issues.iter().enumerate() {
        match files.iter_mut().find(|(name, _)| *name == issue.file) {
            Some((_, indices)) => indices.push(idx),
            None => files.push((issue.file.as_str(), vec![idx])),
        }
    }

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<checkstyle version=\"1.0.0\">\n");
    for (name, indices) in files {
        out.push_str(&format!("  <file name=\"{}\">\n", escape(name)));
        for idx in indices {
            let issue = &report.issues[idx];
            out.push_str(&format!(
                "    <error line=\"{}\" column=\"1\" severity=\"error\" message=\"{}\" source=\"modguard\"></error>\n",
                issue.line,
                escape(&issue.reason)
            ));
        }
        out.push_str("  </file>\n");
    }
    out.push_str("</checkstyle>\n");
    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            c => out.push(c),
        }
    }
    out
}
