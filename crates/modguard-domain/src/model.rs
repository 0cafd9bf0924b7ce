use modguard_types::RepoPath;

/// A parsed `go.mod`.
#[derive(Clone, Debug, Default)]
pub struct ModuleManifest {
    pub path: RepoPath,

    /// Path from the `module` directive, if present.
    pub module: Option<String>,

    /// `require` directives in declaration order.
    pub requirements: Vec<Requirement>,

    /// `replace` directives in declaration order.
    pub replaces: Vec<Replace>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Requirement {
    pub path: String,
    pub version: String,
    /// Marked `// indirect`; only direct requirements are linted.
    pub indirect: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replace {
    pub old_path: String,
    /// Set when the directive only replaces one version (`old v1.2.3 => new`).
    pub old_version: Option<String>,
    pub new_path: String,
    pub new_version: Option<String>,
}

impl Replace {
    /// Filesystem replacements have no version on the right-hand side.
    pub fn is_local(&self) -> bool {
        self.new_version.is_none() || is_filesystem_path(&self.new_path)
    }

    pub fn applies_to(&self, requirement: &Requirement) -> bool {
        self.old_path == requirement.path
            && self
                .old_version
                .as_deref()
                .is_none_or(|v| v == requirement.version)
    }
}

fn is_filesystem_path(p: &str) -> bool {
    if p.starts_with("./") || p.starts_with("../") || p.starts_with('/') || p == "." || p == ".."
    {
        return true;
    }
    // Windows drive absolute: C:\ or C:/
    let bytes = p.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

impl ModuleManifest {
    pub fn direct_requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.iter().filter(|r| !r.indirect)
    }

    pub fn local_replace_for(&self, requirement: &Requirement) -> Option<&Replace> {
        self.replaces
            .iter()
            .find(|r| r.applies_to(requirement) && r.is_local())
    }
}

/// One import declaration of a source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportRef {
    pub path: String,
    /// 1-based line of the import spec.
    pub line: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceImports {
    Parsed(Vec<ImportRef>),
    /// The file could not be parsed; `error` is the parser message.
    Invalid { error: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub path: RepoPath,
    pub imports: SourceImports,
}
