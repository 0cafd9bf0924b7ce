//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after examples.
    pub examples: ExamplePair,
}

/// Before and after examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Fence language for both snippets (`toml`, `go`, `gomod`).
    pub language: &'static str,
    /// Snippet that would trigger an issue.
    pub before: &'static str,
    /// Snippet that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_MODULES_BLOCKED => Some(explain_modules_blocked()),
        ids::CHECK_SOURCE_SYNTAX => Some(explain_invalid_syntax()),

        // Codes
        ids::CODE_NOT_ALLOWED => Some(explain_not_allowed()),
        ids::CODE_BLOCKED_MODULE => Some(explain_blocked_module()),
        ids::CODE_BLOCKED_VERSION => Some(explain_blocked_version()),
        ids::CODE_INVALID_VERSION_CONSTRAINT => Some(explain_invalid_version_constraint()),
        ids::CODE_LOCAL_REPLACE => Some(explain_local_replace()),
        ids::CODE_INVALID_SYNTAX => Some(explain_invalid_syntax()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[ids::CHECK_MODULES_BLOCKED, ids::CHECK_SOURCE_SYNTAX]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_NOT_ALLOWED,
        ids::CODE_BLOCKED_MODULE,
        ids::CODE_BLOCKED_VERSION,
        ids::CODE_INVALID_VERSION_CONSTRAINT,
        ids::CODE_LOCAL_REPLACE,
        ids::CODE_INVALID_SYNTAX,
    ]
}

// --- Check-level explanations ---

fn explain_modules_blocked() -> Explanation {
    Explanation {
        title: "Blocked Module Imports",
        description: "\
Reports every import of a package that belongs to a direct `go.mod` requirement
which the policy blocks.

A requirement is blocked when:
- an allow list is configured and the module is neither an allowed module nor
  under an allowed domain
- a `blocked.modules` rule names it
- a `blocked.versions` rule names it and the required version falls inside the
  rule's constraint (or the constraint cannot be parsed)
- `blocked.localReplaceDirectives` is on and `go.mod` replaces it with a local path

Allow-listed modules are never blocked. Indirect requirements are not inspected.",
        remediation: "\
Switch the import to an allowed or recommended module, bump the version out of the
blocked range, remove the local replace directive, or add the module to
`allowed.modules` if it is acceptable.",
        examples: ExamplePair {
            language: "toml",
            before: r#"[allowed]
modules = ["gopkg.in/yaml.v2"]"#,
            after: r#"[allowed]
modules = ["gopkg.in/yaml.v2", "github.com/google/uuid"]"#,
        },
    }
}

// --- Code-level explanations ---

fn explain_not_allowed() -> Explanation {
    Explanation {
        title: "Module Not In Allowed List",
        description: "\
The imported package belongs to a direct requirement that matches neither
`allowed.modules` (exact, case-insensitive) nor `allowed.domains` (case-insensitive
prefix). This code is only produced when at least one allow rule is configured and no
other rule targets the module.",
        remediation: "\
Replace the dependency with an allowed one, or extend the allow list:

    [allowed]
    domains = [\"golang.org\"]
    modules = [\"github.com/some/module\"]",
        examples: ExamplePair {
            language: "toml",
            before: r#"[allowed]
domains = ["golang.org"]"#,
            after: r#"[allowed]
domains = ["golang.org"]
modules = ["github.com/mitchellh/go-homedir"]"#,
        },
    }
}

fn explain_blocked_module() -> Explanation {
    Explanation {
        title: "Module In Blocked List",
        description: "\
The imported package belongs to a module listed under `blocked.modules`. The rule may
carry recommended replacement modules and a reason, both of which are included in
the issue text.

A rule does not apply to the module that is itself one of the recommendations.",
        remediation: "\
Migrate the import to one of the recommended modules and drop the requirement from
`go.mod`.",
        examples: ExamplePair {
            language: "go",
            before: r#"import module "github.com/uudashr/go-module""#,
            after: r#"import "golang.org/x/mod/modfile""#,
        },
    }
}

fn explain_blocked_version() -> Explanation {
    Explanation {
        title: "Blocked Module Version",
        description: "\
The required version of the module falls inside the constraint of a
`blocked.versions` rule, e.g. `<= 1.1.0`. The constraint describes the versions that
are blocked.

Constraints accept `=`, `!=`, `>`, `>=`, `<`, `<=`, `~`, `^`, wildcards (`1.2.x`),
space or comma separated conjunctions and `||` alternatives.",
        remediation: "\
Upgrade (or downgrade) the requirement to a version outside the blocked range:

    go get github.com/mitchellh/go-homedir@v1.2.0",
        examples: ExamplePair {
            language: "gomod",
            before: "require github.com/mitchellh/go-homedir v1.1.0",
            after: "require github.com/mitchellh/go-homedir v1.2.0",
        },
    }
}

fn explain_invalid_version_constraint() -> Explanation {
    Explanation {
        title: "Invalid Version Constraint",
        description: "\
A `blocked.versions` rule targets this module but its constraint (or the module's
required version) could not be parsed. The module is reported as blocked so the
broken rule does not silently let it through.",
        remediation: "\
Fix the constraint syntax in the configuration, e.g. `== 1.0.0` should be `= 1.0.0`.",
        examples: ExamplePair {
            language: "toml",
            before: r#"[[blocked.versions]]
"github.com/gin-gonic/gin" = { version = "== 1.0.0" }"#,
            after: r#"[[blocked.versions]]
"github.com/gin-gonic/gin" = { version = "= 1.0.0" }"#,
        },
    }
}

fn explain_local_replace() -> Explanation {
    Explanation {
        title: "Local Replace Directive",
        description: "\
`go.mod` replaces the module with a filesystem path. Local replacements are not
reproducible outside the developer's machine, so they are blocked when
`blocked.localReplaceDirectives` is enabled.",
        remediation: "\
Remove the replace directive, or point it at a published module version.",
        examples: ExamplePair {
            language: "gomod",
            before: "replace github.com/acme/lib => ../lib",
            after: "replace github.com/acme/lib => github.com/acme/lib-fork v1.4.0",
        },
    }
}

fn explain_invalid_syntax() -> Explanation {
    Explanation {
        title: "Invalid Go Syntax",
        description: "\
The source file could not be parsed as Go, so its imports cannot be checked. A syntax
error anywhere in the file counts, not only in the import block. The file is reported
once at line 0.",
        remediation: "\
Fix the syntax error reported in the issue text (run `go vet` or `gofmt -l` on the
file to locate it).",
        examples: ExamplePair {
            language: "go",
            before: "package main\n\nimport \"fmt",
            after: "package main\n\nimport \"fmt\"",
        },
    }
}
