use crate::RepoPath;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

/// Stable schema identifier for modguard reports.
pub const SCHEMA_REPORT_V1: &str = "modguard.report.v1";

/// A single policy violation at a file and line.
///
/// Line `0` is used for file-level issues (the file could not be parsed).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub file: RepoPath,
    pub line: u32,
    pub check_id: String,
    pub code: String,
    pub reason: String,

    /// Blocked module the import matched, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Import path as written in the source file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_path: Option<String>,

    /// Stable identifier intended for dedup and trending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:1 {}", self.file, self.line, self.reason)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Modguard-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ModguardData {
    /// Module declared by the scanned `go.mod`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    pub files_scanned: u32,
    pub imports_scanned: u32,

    /// Direct requirements that resolved to at least one block cause, in manifest order.
    #[serde(default)]
    pub blocked_modules: Vec<String>,

    pub issues_total: u32,
}

/// Report envelope written by `modguard check --report json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportEnvelope<TData = ModguardData> {
    pub schema: String,
    pub tool: ToolMeta,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub issues: Vec<Issue>,
    pub data: TData,
}

pub type ModguardReport = ReportEnvelope<ModguardData>;

#[cfg(test)]
mod tests {
    use super::*;

    fn issue() -> Issue {
        Issue {
            file: RepoPath::new("test.go"),
            line: 1,
            check_id: "modules.blocked".to_string(),
            code: "not_allowed".to_string(),
            reason: "Some reason.".to_string(),
            module: None,
            import_path: None,
            fingerprint: None,
        }
    }

    #[test]
    fn issue_display_is_file_line_column_reason() {
        assert_eq!(issue().to_string(), "test.go:1:1 Some reason.");
    }

    #[test]
    fn issue_json_omits_missing_optionals() {
        let value = serde_json::to_value(issue()).expect("serialize");
        assert!(value.get("module").is_none());
        assert!(value.get("fingerprint").is_none());
        assert_eq!(value["file"], "test.go");
        assert_eq!(value["line"], 1);
    }
}
