use sha2::{Digest, Sha256};

/// Stable SHA-256 fingerprint for an issue.
///
/// Identity fields: check id, code, file (repo-relative), import path and blocked module.
/// Line numbers are left out so fingerprints survive unrelated edits.
pub fn fingerprint_for_issue(
    check_id: &str,
    code: &str,
    file: &str,
    import_path: Option<&str>,
    module: Option<&str>,
) -> String {
    let mut parts = vec![check_id, code, file];
    parts.extend(import_path);
    parts.extend(module);
    let canonical = parts.join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}
