//! `go.mod` parsing.
//!
//! Line oriented: one directive per line, or a parenthesized block of them. Only the
//! directives the policy needs are kept (`module`, `require`, `replace`); the others are
//! recognized and skipped.

use anyhow::bail;
use modguard_domain::model::{ModuleManifest, Replace, Requirement};
use modguard_types::RepoPath;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Word(String),
    Quoted(String),
    LParen,
    RParen,
}

impl Token {
    /// Directive argument value; parentheses are not values.
    fn value(&self) -> Option<&str> {
        match self {
            Token::Word(s) | Token::Quoted(s) => Some(s),
            Token::LParen | Token::RParen => None,
        }
    }

    fn is_arrow(&self) -> bool {
        matches!(self, Token::Word(w) if w == "=>")
    }
}

const BLOCK_VERBS: &[&str] = &[
    "require", "replace", "exclude", "retract", "godebug", "tool", "ignore",
];
const SKIPPED_VERBS: &[&str] = &[
    "go", "toolchain", "exclude", "retract", "godebug", "tool", "ignore",
];

pub fn parse_go_mod(path: &RepoPath, text: &str) -> anyhow::Result<ModuleManifest> {
    let mut manifest = ModuleManifest {
        path: path.clone(),
        ..ModuleManifest::default()
    };
    let mut block: Option<(String, usize)> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let (tokens, comment) =
            tokenize(raw).map_err(|msg| anyhow::anyhow!("{path}:{line_no}: {msg}"))?;
        if tokens.is_empty() {
            continue;
        }

        if let Some((verb, _)) = block.clone() {
            if tokens == [Token::RParen] {
                block = None;
                continue;
            }
            apply(&mut manifest, &verb, &tokens, comment.as_deref())
                .map_err(|msg| anyhow::anyhow!("{path}:{line_no}: {msg}"))?;
            continue;
        }

        let Token::Word(verb) = &tokens[0] else {
            bail!("{path}:{line_no}: unexpected token at start of line");
        };

        match &tokens[1..] {
            [Token::LParen] if BLOCK_VERBS.contains(&verb.as_str()) => {
                block = Some((verb.clone(), line_no));
            }
            [Token::LParen, Token::RParen] if BLOCK_VERBS.contains(&verb.as_str()) => {}
            args => apply(&mut manifest, verb, args, comment.as_deref())
                .map_err(|msg| anyhow::anyhow!("{path}:{line_no}: {msg}"))?,
        }
    }

    if let Some((verb, start)) = block {
        bail!("{path}:{start}: {verb} block is not closed");
    }
    Ok(manifest)
}

fn apply(
    manifest: &mut ModuleManifest,
    verb: &str,
    args: &[Token],
    comment: Option<&str>,
) -> Result<(), String> {
    match verb {
        "module" => {
            let args = values(args)?;
            let [module] = args.as_slice() else {
                return Err("usage: module module/path".to_string());
            };
            manifest.module = Some(module.to_string());
        }
        "require" => {
            let args = values(args)?;
            let [path, version] = args.as_slice() else {
                return Err("usage: require module/path v1.2.3".to_string());
            };
            manifest.requirements.push(Requirement {
                path: path.to_string(),
                version: version.to_string(),
                indirect: is_indirect(comment),
            });
        }
        "replace" => manifest.replaces.push(parse_replace(args)?),
        v if SKIPPED_VERBS.contains(&v) => {}
        other => return Err(format!("unknown directive: {other}")),
    }
    Ok(())
}

fn parse_replace(args: &[Token]) -> Result<Replace, String> {
    let usage = || "usage: replace module/path [v1.2.3] => other/module [v1.4.5]".to_string();
    let arrow = args.iter().position(Token::is_arrow).ok_or_else(usage)?;
    let (old, new) = (values(&args[..arrow])?, values(&args[arrow + 1..])?);

    let (old_path, old_version) = match old.as_slice() {
        [path] => (*path, None),
        [path, version] => (*path, Some(version.to_string())),
        _ => return Err(usage()),
    };
    let (new_path, new_version) = match new.as_slice() {
        [path] => (*path, None),
        [path, version] => (*path, Some(version.to_string())),
        _ => return Err(usage()),
    };

    Ok(Replace {
        old_path: old_path.to_string(),
        old_version,
        new_path: new_path.to_string(),
        new_version,
    })
}

fn values(args: &[Token]) -> Result<Vec<&str>, String> {
    args.iter()
        .map(|t| t.value().ok_or_else(|| "unexpected parenthesis".to_string()))
        .collect()
}

/// `// indirect` or `// indirect; other notes`.
fn is_indirect(comment: Option<&str>) -> bool {
    comment.is_some_and(|c| c == "indirect" || c.starts_with("indirect;"))
}

/// Split one line into tokens and its trailing `//` comment.
fn tokenize(line: &str) -> Result<(Vec<Token>, Option<String>), String> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '/' if line[start..].starts_with("//") => {
                return Ok((tokens, Some(line[start + 2..].trim().to_string())));
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '"' => {
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some((_, '"')) => break,
                        Some((_, '\\')) => match chars.next() {
                            Some((_, c)) => value.push(c),
                            None => return Err("unterminated quoted string".to_string()),
                        },
                        Some((_, c)) => value.push(c),
                        None => return Err("unterminated quoted string".to_string()),
                    }
                }
                tokens.push(Token::Quoted(value));
            }
            '`' => {
                chars.next();
                let rest = &line[start + 1..];
                let Some(end) = rest.find('`') else {
                    return Err("unterminated raw string".to_string());
                };
                tokens.push(Token::Quoted(rest[..end].to_string()));
                let close = start + 1 + end;
                while chars.next_if(|&(i, _)| i <= close).is_some() {}
            }
            _ => {
                let mut word = String::new();
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_whitespace()
                        || matches!(c, '(' | ')' | '"' | '`')
                        || line[i..].starts_with("//")
                    {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                tokens.push(Token::Word(word));
            }
        }
    }
    Ok((tokens, None))
}
