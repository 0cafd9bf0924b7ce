use crate::classify::blocking_causes;
use crate::fingerprint::fingerprint_for_issue;
use crate::model::{ModuleManifest, SourceFile, SourceImports};
use crate::report::DomainReport;
use crate::resolve::BlockedModuleSet;
use modguard_types::{ids, Issue, ModguardData, Verdict};

/// Lint the imports of `files` against `set`.
///
/// Issues come out in file order, then import order, then cause order.
pub fn process_files(set: &BlockedModuleSet, files: &[SourceFile]) -> Vec<Issue> {
    let mut issues = Vec::new();
    for file in files {
        match &file.imports {
            SourceImports::Invalid { error } => issues.push(syntax_issue(file, error)),
            SourceImports::Parsed(imports) => {
                for import in imports {
                    for (entry, cause) in blocking_causes(&import.path, set) {
                        issues.push(Issue {
                            file: file.path.clone(),
                            line: import.line,
                            check_id: ids::CHECK_MODULES_BLOCKED.to_string(),
                            code: cause.code().to_string(),
                            reason: cause.describe(&import.path),
                            module: Some(entry.module.clone()),
                            import_path: Some(import.path.clone()),
                            fingerprint: Some(fingerprint_for_issue(
                                ids::CHECK_MODULES_BLOCKED,
                                cause.code(),
                                file.path.as_str(),
                                Some(&import.path),
                                Some(&entry.module),
                            )),
                        });
                    }
                }
            }
        }
    }
    issues
}

fn syntax_issue(file: &SourceFile, error: &str) -> Issue {
    Issue {
        file: file.path.clone(),
        line: 0,
        check_id: ids::CHECK_SOURCE_SYNTAX.to_string(),
        code: ids::CODE_INVALID_SYNTAX.to_string(),
        reason: format!("invalid syntax, file cannot be linted ({error})"),
        module: None,
        import_path: None,
        fingerprint: Some(fingerprint_for_issue(
            ids::CHECK_SOURCE_SYNTAX,
            ids::CODE_INVALID_SYNTAX,
            file.path.as_str(),
            None,
            None,
        )),
    }
}

/// Lint `files` and summarize the run.
pub fn evaluate(
    manifest: &ModuleManifest,
    set: &BlockedModuleSet,
    files: &[SourceFile],
) -> DomainReport {
    let issues = process_files(set, files);

    let imports_scanned = files
        .iter()
        .map(|f| match &f.imports {
            SourceImports::Parsed(imports) => imports.len() as u32,
            SourceImports::Invalid { .. } => 0,
        })
        .sum();

    let verdict = if issues.is_empty() {
        Verdict::Pass
    } else {
        Verdict::Fail
    };

    let data = ModguardData {
        module: manifest.module.clone(),
        files_scanned: files.len() as u32,
        imports_scanned,
        blocked_modules: set.module_names(),
        issues_total: issues.len() as u32,
    };

    DomainReport {
        verdict,
        issues,
        data,
    }
}
