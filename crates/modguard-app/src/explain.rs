//! The `explain` use case: look up check/code documentation.

use modguard_types::explain::{self, Explanation};
use std::fmt::Write;

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// Unknown identifier; includes available check_ids and codes.
    NotFound {
        identifier: String,
        available_check_ids: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

/// Resolve `identifier` as a check id first, then as an issue code.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_check_ids: explain::all_check_ids(),
            available_codes: explain::all_codes(),
        },
    }
}

/// Terminal rendering: title, description, remediation, then a before/after example pair
/// fenced in the example's language.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();
    let lang = exp.examples.language;
    let _ = write!(
        out,
        "{title}\n{underline}\n\n{description}\n\nRemediation\n-----------\n{remediation}\n\n\
         Examples\n--------\n\n\
         Before (violation):\n```{lang}\n{before}\n```\n\n\
         After (fixed):\n```{lang}\n{after}\n```\n",
        title = exp.title,
        underline = "=".repeat(exp.title.len()),
        description = exp.description,
        remediation = exp.remediation,
        before = exp.examples.before,
        after = exp.examples.after,
    );
    out
}

/// Message for an identifier with no explanation, listing what is known.
pub fn format_not_found(identifier: &str, check_ids: &[&str], codes: &[&str]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Unknown check_id or code: {identifier}\n");
    let _ = writeln!(out, "Available check_ids:");
    for id in check_ids {
        let _ = writeln!(out, "  - {id}");
    }
    let _ = writeln!(out, "\nAvailable codes:");
    for code in codes {
        let _ = writeln!(out, "  - {code}");
    }
    out
}
