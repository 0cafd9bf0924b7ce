use modguard_types::{Issue, ModguardData, Verdict};

/// Result of linting one module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainReport {
    pub verdict: Verdict,
    pub issues: Vec<Issue>,
    pub data: ModguardData,
}

impl DomainReport {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}
