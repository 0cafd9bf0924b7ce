use crate::model::{ImportRef, ModuleManifest, Replace, Requirement, SourceFile, SourceImports};
use crate::policy::{BlockedModule, BlockedVersion};
use modguard_types::RepoPath;

pub fn require(path: &str, version: &str) -> Requirement {
    Requirement {
        path: path.to_string(),
        version: version.to_string(),
        indirect: false,
    }
}

/// A filesystem replace of every version of `old`.
pub fn replace(old: &str, new: &str) -> Replace {
    Replace {
        old_path: old.to_string(),
        old_version: None,
        new_path: new.to_string(),
        new_version: None,
    }
}

pub fn manifest(module: &str, requirements: Vec<Requirement>, replaces: Vec<Replace>) -> ModuleManifest {
    ModuleManifest {
        path: RepoPath::new("go.mod"),
        module: Some(module.to_string()),
        requirements,
        replaces,
    }
}

pub fn blocked_module(module: &str, recommendations: &[&str], reason: &str) -> BlockedModule {
    BlockedModule {
        module: module.to_string(),
        recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
        reason: reason.to_string(),
    }
}

pub fn blocked_version(module: &str, version: &str, reason: &str) -> BlockedVersion {
    BlockedVersion {
        module: module.to_string(),
        version: version.to_string(),
        reason: reason.to_string(),
    }
}

pub fn source(path: &str, imports: &[(&str, u32)]) -> SourceFile {
    SourceFile {
        path: RepoPath::new(path),
        imports: SourceImports::Parsed(
            imports
                .iter()
                .map(|(path, line)| ImportRef {
                    path: path.to_string(),
                    line: *line,
                })
                .collect(),
        ),
    }
}

pub fn invalid_source(path: &str, error: &str) -> SourceFile {
    SourceFile {
        path: RepoPath::new(path),
        imports: SourceImports::Invalid {
            error: error.to_string(),
        },
    }
}
