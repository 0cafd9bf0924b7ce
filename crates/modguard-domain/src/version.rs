//! Semantic version constraints for `blocked.versions` rules.
//!
//! Grammar: comparators (`=`, `!=`, `>`, `>=`, `<`, `<=`, `~`, `^`, plus the aliases `=>`,
//! `=<`, `~>`) joined by whitespace or commas (AND) and `||` (OR). A bare version is an
//! exact match. Partial versions (`1.2`, `1.2.x`) compare only the components they name.

use semver::{Prerelease, Version};
use std::cmp::Ordering;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("improper constraint: {0}")]
    InvalidConstraint(String),
    #[error("invalid semantic version: {0}")]
    InvalidVersion(String),
}

/// Does `version` fall inside `constraint`?
pub fn satisfies(constraint: &str, version: &str) -> Result<bool, VersionError> {
    let constraint = Constraint::parse(constraint)?;
    let version = parse_version(version)?;
    Ok(constraint.matches(&version))
}

/// Parse a Go module version (`v1.2.3`, `1.19`, `v0.0.0-2019...-abcdef`).
///
/// Missing minor/patch components are zero-filled.
pub fn parse_version(input: &str) -> Result<Version, VersionError> {
    let invalid = || VersionError::InvalidVersion(input.to_string());

    let trimmed = input.trim();
    let body = trimmed.strip_prefix('v').unwrap_or(trimmed);
    let split = body.find(|c| c == '-' || c == '+').unwrap_or(body.len());
    let (core, suffix) = body.split_at(split);

    let parts: Vec<&str> = core.split('.').collect();
    let numeric = |p: &&str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    if parts.len() > 3 || !parts.iter().all(numeric) {
        return Err(invalid());
    }

    let mut full = parts.join(".");
    for _ in parts.len()..3 {
        full.push_str(".0");
    }
    full.push_str(suffix);
    Version::parse(&full).map_err(|_| invalid())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RawOp {
    Simple(Op),
    Tilde,
    Caret,
}

const OPERATORS: &[(&str, RawOp)] = &[
    ("=", RawOp::Simple(Op::Eq)),
    ("!=", RawOp::Simple(Op::Ne)),
    (">", RawOp::Simple(Op::Gt)),
    (">=", RawOp::Simple(Op::Ge)),
    ("=>", RawOp::Simple(Op::Ge)),
    ("<", RawOp::Simple(Op::Lt)),
    ("<=", RawOp::Simple(Op::Le)),
    ("=<", RawOp::Simple(Op::Le)),
    ("~", RawOp::Tilde),
    ("~>", RawOp::Tilde),
    ("^", RawOp::Caret),
];

/// A version with optional trailing components; `None` means "any".
///
/// Once a component is `None`, every later component is `None` too.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Bound {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Prerelease,
}

impl Bound {
    fn exact(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major: Some(major),
            minor: Some(minor),
            patch: Some(patch),
            pre: Prerelease::EMPTY,
        }
    }

    fn parse(input: &str) -> Option<Self> {
        let body = input.strip_prefix('v').unwrap_or(input);
        let body = body.split_once('+').map_or(body, |(head, _build)| head);
        let (core, pre) = match body.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (body, None),
        };

        let mut nums: [Option<u64>; 3] = [None; 3];
        let mut parts = core.split('.');
        let mut wildcard = false;
        for slot in nums.iter_mut() {
            match parts.next() {
                None => break,
                Some("x" | "X" | "*") => wildcard = true,
                Some(p) if !wildcard && !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()) => {
                    *slot = Some(p.parse().ok()?);
                }
                Some(_) => return None,
            }
        }
        if parts.next().is_some() {
            return None;
        }

        let pre = match pre {
            Some(p) if nums[2].is_some() => Prerelease::new(p).ok()?,
            Some(_) => return None,
            None => Prerelease::EMPTY,
        };

        Some(Self {
            major: nums[0],
            minor: nums[1],
            patch: nums[2],
            pre,
        })
    }

    /// Compare `v` against this bound on the components the bound names.
    fn compare(&self, v: &Version) -> Ordering {
        let Some(major) = self.major else {
            return Ordering::Equal;
        };
        let ord = v.major.cmp(&major);
        let Some(minor) = self.minor else {
            return ord;
        };
        let ord = ord.then(v.minor.cmp(&minor));
        let Some(patch) = self.patch else {
            return ord;
        };
        ord.then(v.patch.cmp(&patch)).then_with(|| v.pre.cmp(&self.pre))
    }

    fn floor(&self) -> Self {
        Self {
            major: Some(self.major.unwrap_or(0)),
            minor: Some(self.minor.unwrap_or(0)),
            patch: Some(self.patch.unwrap_or(0)),
            pre: self.pre.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Comparator {
    op: Op,
    bound: Bound,
}

impl Comparator {
    fn matches(&self, v: &Version) -> bool {
        let ord = self.bound.compare(v);
        match self.op {
            Op::Eq => ord == Ordering::Equal,
            Op::Ne => ord != Ordering::Equal,
            Op::Gt => ord == Ordering::Greater,
            Op::Ge => ord != Ordering::Less,
            Op::Lt => ord == Ordering::Less,
            Op::Le => ord != Ordering::Greater,
        }
    }
}

/// A parsed constraint: alternatives (`||`) of comparator conjunctions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constraint {
    source: String,
    groups: Vec<Vec<Comparator>>,
}

impl Constraint {
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let invalid = || VersionError::InvalidConstraint(input.to_string());

        let mut groups = Vec::new();
        for alternative in input.split("||") {
            let mut group = Vec::new();
            let mut tokens = alternative
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|t| !t.is_empty());

            while let Some(token) = tokens.next() {
                let (op, operand) = split_operator(token).ok_or_else(invalid)?;
                let operand = if operand.is_empty() {
                    tokens.next().ok_or_else(invalid)?
                } else {
                    operand
                };
                let bound = Bound::parse(operand).ok_or_else(invalid)?;
                push_comparators(op, bound, &mut group).ok_or_else(invalid)?;
            }

            if group.is_empty() {
                return Err(invalid());
            }
            groups.push(group);
        }

        Ok(Self {
            source: input.to_string(),
            groups,
        })
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.groups.iter().any(|group| group_matches(group, version))
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn split_operator(token: &str) -> Option<(RawOp, &str)> {
    let op_len = token
        .bytes()
        .take_while(|b| b"<>=!~^".contains(b))
        .count();
    let (op, rest) = token.split_at(op_len);
    if op.is_empty() {
        return Some((RawOp::Simple(Op::Eq), rest));
    }
    OPERATORS
        .iter()
        .find(|(text, _)| *text == op)
        .map(|(_, raw)| (*raw, rest))
}

/// Expand `op bound` into plain comparators. `None` when an upper bound does not fit in `u64`.
fn push_comparators(op: RawOp, bound: Bound, out: &mut Vec<Comparator>) -> Option<()> {
    let upper = match (op, bound.major) {
        (RawOp::Simple(op), _) => {
            out.push(Comparator { op, bound });
            return Some(());
        }
        // `~*` / `^*` match anything.
        (_, None) => {
            out.push(Comparator { op: Op::Eq, bound });
            return Some(());
        }
        (RawOp::Tilde, Some(major)) => match bound.minor {
            Some(minor) => Bound::exact(major, minor.checked_add(1)?, 0),
            None => Bound::exact(major.checked_add(1)?, 0, 0),
        },
        (RawOp::Caret, Some(major)) => match (bound.minor, bound.patch) {
            _ if major > 0 => Bound::exact(major.checked_add(1)?, 0, 0),
            (None, _) => Bound::exact(1, 0, 0),
            (Some(minor), _) if minor > 0 => Bound::exact(0, minor.checked_add(1)?, 0),
            (Some(_), None) => Bound::exact(0, 1, 0),
            (Some(_), Some(patch)) => Bound::exact(0, 0, patch.checked_add(1)?),
        },
    };
    out.push(Comparator {
        op: Op::Ge,
        bound: bound.floor(),
    });
    out.push(Comparator {
        op: Op::Lt,
        bound: upper,
    });
    Some(())
}

/// A prerelease version only falls in a group that names a prerelease itself.
fn group_matches(group: &[Comparator], version: &Version) -> bool {
    if !version.pre.is_empty() && group.iter().all(|c| c.bound.pre.is_empty()) {
        return false;
    }
    group.iter().all(|c| c.matches(version))
}
