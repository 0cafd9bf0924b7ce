use serde::{Deserialize, Serialize};
use std::fmt;

/// Path of a Go source file or `go.mod`, relative to the working directory.
///
/// Separators are always `/` and a leading `./` is dropped, so the same file is spelled
/// the same way in every report. An empty input becomes `.`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoPath(String);

impl Default for RepoPath {
    fn default() -> Self {
        RepoPath::new(".")
    }
}

impl RepoPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let normalized = s.as_ref().replace('\\', "/");
        let mut rest = normalized.as_str();
        while let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        }
        match rest {
            "" => Self(".".to_string()),
            p => Self(p.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `_test.go` files are skipped by `check --no-test`.
    pub fn is_go_test_file(&self) -> bool {
        self.0.ends_with("_test.go")
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
