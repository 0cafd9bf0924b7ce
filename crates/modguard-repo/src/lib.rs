//! Repository adapters: find Go sources, read and parse `go.mod` and import declarations.
//!
//! This crate is allowed to do filesystem IO. It never shells out to the `go` tool.

#![forbid(unsafe_code)]

mod discover;
mod gomod;
mod imports;

use anyhow::Context;
use camino::Utf8Path;
use modguard_domain::model::{ModuleManifest, SourceFile, SourceImports};
use modguard_types::RepoPath;
use rayon::prelude::*;

pub use discover::find_go_files;
pub use gomod::parse_go_mod;
pub use imports::{extract_imports, SyntaxError};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;

    /// Parse arbitrary text as a `go.mod` file.
    ///
    /// Returns the number of requirements on success. **Never panics** on any input.
    pub fn parse_go_mod(text: &str) -> anyhow::Result<usize> {
        let m = gomod::parse_go_mod(&RepoPath::new("go.mod"), text)?;
        Ok(m.requirements.len())
    }

    /// Extract imports from arbitrary text as if it were a Go source file.
    ///
    /// Returns the number of imports on success. **Never panics** on any input.
    pub fn extract_imports(text: &str) -> Result<usize, SyntaxError> {
        Ok(imports::extract_imports(text)?.len())
    }
}

/// Read and parse `<work_dir>/go.mod`.
pub fn load_manifest(work_dir: &Utf8Path) -> anyhow::Result<ModuleManifest> {
    let rel = RepoPath::new("go.mod");
    let abs = work_dir.join(rel.as_str());
    let text = std::fs::read_to_string(&abs).with_context(|| format!("read {abs}"))?;
    parse_go_mod(&rel, &text).context("parse go.mod")
}

/// Read every file and extract its imports, in the order given.
///
/// Unreadable files are errors; unparsable ones become [`SourceImports::Invalid`].
pub fn load_sources(work_dir: &Utf8Path, files: &[RepoPath]) -> anyhow::Result<Vec<SourceFile>> {
    files
        .par_iter()
        .map(|path| -> anyhow::Result<SourceFile> {
            let abs = work_dir.join(path.as_str());
            let bytes = std::fs::read(&abs).with_context(|| format!("read {abs}"))?;
            Ok(SourceFile {
                path: path.clone(),
                imports: source_imports(path, &bytes),
            })
        })
        .collect()
}

fn source_imports(path: &RepoPath, bytes: &[u8]) -> SourceImports {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            return SourceImports::Invalid {
                error: format!("{path}: illegal UTF-8 encoding ({err})"),
            };
        }
    };
    match imports::extract_imports(text) {
        Ok(imports) => SourceImports::Parsed(imports),
        Err(err) => SourceImports::Invalid {
            error: format!("{path}:{err}"),
        },
    }
}
