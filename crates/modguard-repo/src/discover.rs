use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use modguard_types::RepoPath;
use std::collections::BTreeSet;
use walkdir::{DirEntry, WalkDir};

/// Expand command-line targets into Go source files.
///
/// Behavior:
/// - `dir/...` walks `dir` recursively (hidden directories skipped) for `*.go` files.
/// - A directory target contributes the `*.go` files directly inside it.
/// - A file target is taken as is; missing targets are skipped.
/// - With `skip_tests`, `_test.go` files are dropped.
///
/// Returned paths are relative to `work_dir` when possible, in target order and then
/// lexical order, without duplicates.
pub fn find_go_files(
    work_dir: &Utf8Path,
    targets: &[String],
    skip_tests: bool,
) -> Vec<RepoPath> {
    let default = ["./...".to_string()];
    let targets = if targets.is_empty() {
        &default[..]
    } else {
        targets
    };

    let mut found: Vec<Utf8PathBuf> = Vec::new();
    for target in targets {
        if let Some(dir) = recursive_dir(target) {
            let root = resolve(work_dir, dir);
            if !root.is_dir() {
                tracing::warn!(%target, "target directory does not exist");
                continue;
            }
            found.extend(go_files_under(&root, usize::MAX));
            continue;
        }

        let path = resolve(work_dir, target);
        if path.is_file() {
            found.push(path);
        } else if path.is_dir() {
            found.extend(go_files_under(&path, 1));
        } else {
            tracing::warn!(%target, "target does not exist");
        }
    }

    let mut seen = BTreeSet::new();
    found
        .into_iter()
        .map(|abs| relative_to(work_dir, &abs))
        .filter(|p| !(skip_tests && p.is_go_test_file()))
        .filter(|p| seen.insert(p.clone()))
        .collect()
}

/// `./...` -> `.`, `pkg/...` -> `pkg`.
fn recursive_dir(target: &str) -> Option<&str> {
    if target == "..." {
        return Some(".");
    }
    let dir = target.strip_suffix("/...")?;
    Some(if dir.is_empty() { "/" } else { dir })
}

fn resolve(work_dir: &Utf8Path, target: &str) -> Utf8PathBuf {
    let p = Utf8Path::new(target);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let rel: Utf8PathBuf = p
        .components()
        .filter(|c| *c != Utf8Component::CurDir)
        .collect();
    if rel.as_str().is_empty() {
        work_dir.to_path_buf()
    } else {
        work_dir.join(rel)
    }
}

fn go_files_under(root: &Utf8Path, max_depth: usize) -> Vec<Utf8PathBuf> {
    WalkDir::new(root)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden_dir(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| Utf8PathBuf::from_path_buf(e.into_path()).ok())
        .filter(|p| p.extension() == Some("go"))
        .collect()
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

fn relative_to(work_dir: &Utf8Path, abs: &Utf8Path) -> RepoPath {
    match abs.strip_prefix(work_dir) {
        Ok(rel) => RepoPath::new(rel.as_str().replace('\\', "/")),
        Err(_) => RepoPath::new(abs.as_str().replace('\\', "/")),
    }
}
