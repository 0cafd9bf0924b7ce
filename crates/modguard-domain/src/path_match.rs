//! Module-path containment.
//!
//! `github.com/acme/foo/bar` lives in module `github.com/acme/foo`, but
//! `github.com/acme/foo/v2` does not: a `/vN` segment (N >= 2) right after an unversioned
//! module path starts a different major version, which is a different module.

/// Split an optional trailing `/vN` (N >= 2) major-version suffix off a module path.
pub fn split_path_version(module: &str) -> (&str, Option<u64>) {
    match module.rsplit_once('/') {
        Some((base, last)) => match major_segment(last) {
            Some(major) => (base, Some(major)),
            None => (module, None),
        },
        None => (module, None),
    }
}

/// Parse a `vN` path segment with N >= 2 and no leading zero.
fn major_segment(segment: &str) -> Option<u64> {
    let digits = segment.strip_prefix('v')?;
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    digits.parse().ok().filter(|n| *n >= 2)
}

/// Is package `pkg` provided by module `module`?
///
/// Comparison is case-sensitive.
pub fn is_package_in_module(pkg: &str, module: &str) -> bool {
    if pkg == module {
        return true;
    }
    let Some(rest) = pkg
        .strip_prefix(module)
        .and_then(|rest| rest.strip_prefix('/'))
    else {
        return false;
    };

    let (_, module_major) = split_path_version(module);
    if module_major.is_some() {
        return true;
    }

    let next = rest.split('/').next().unwrap_or(rest);
    major_segment(next).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_in_module_table() {
        let cases = [
            ("github.com/acme/foo/bar", "github.com/acme/foo", true),
            ("github.com/acme/foo", "github.com/acme/foo", true),
            ("github.com/aws/aws-sdk-go", "github.com/aws/aws-sdk-go-v2", false),
            ("github.com/aws/aws-sdk-go/foo", "github.com/aws/aws-sdk-go-v2", false),
            ("github.com/aws/aws-sdk-go-v2/foo", "github.com/aws/aws-sdk-go-v2", true),
            ("github.com/foo/bar/v20", "github.com/foo/bar", false),
            ("github.com/foo/bar/v2/baz", "github.com/foo/bar", false),
            ("github.com/foo/bar/v60/baz/taz", "github.com/foo/bar/v60", true),
            ("github.com/foo/bar/v50", "github.com/foo/bar/v50", true),
            ("github.com/foo/bar/v40", "github.com/foo/bar/v41", false),
            ("github.com/foo/bar", "github.com/foo/bar/v10", false),
            ("github.com/foo/bar/v1/baz", "github.com/foo/bar", true),
            ("github.com/foo/bar/v02", "github.com/foo/bar", true),
            ("github.com/foo/barista", "github.com/foo/bar", false),
            ("gopkg.in/yaml.v2/internal", "gopkg.in/yaml.v2", true),
        ];
        for (pkg, module, want) in cases {
            assert_eq!(
                is_package_in_module(pkg, module),
                want,
                "pkg={pkg} module={module}"
            );
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!is_package_in_module(
            "github.com/Acme/foo/bar",
            "github.com/acme/foo"
        ));
    }

    #[test]
    fn split_path_version_cases() {
        assert_eq!(
            split_path_version("github.com/foo/bar/v60"),
            ("github.com/foo/bar", Some(60))
        );
        assert_eq!(split_path_version("github.com/foo/bar"), ("github.com/foo/bar", None));
        assert_eq!(split_path_version("github.com/foo/v1"), ("github.com/foo/v1", None));
        assert_eq!(split_path_version("github.com/foo/v01"), ("github.com/foo/v01", None));
        assert_eq!(split_path_version("v2"), ("v2", None));
    }
}
