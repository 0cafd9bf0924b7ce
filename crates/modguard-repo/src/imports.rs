//! Import extraction from Go source files.
//!
//! The whole file is parsed with the tree-sitter Go grammar. Any syntax error makes the file
//! unlintable; otherwise the `import_spec` nodes give the import paths and their lines.

use modguard_domain::model::ImportRef;
use tree_sitter::{Node, Parser, Point};

/// A syntax error in a Go file, positioned at 1-based line and byte column.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{col}: {message}")]
pub struct SyntaxError {
    pub line: u32,
    pub col: u32,
    pub message: String,
}

const DECLARATIONS: &[&str] = &[
    "const_declaration",
    "var_declaration",
    "type_declaration",
    "function_declaration",
    "method_declaration",
];

/// Import declarations of a Go source file, in source order.
pub fn extract_imports(src: &str) -> Result<Vec<ImportRef>, SyntaxError> {
    let (body, bom) = match src.strip_prefix('\u{feff}') {
        Some(rest) => (rest, '\u{feff}'.len_utf8()),
        None => (src, 0),
    };
    let at = |point: Point, message: String| SyntaxError {
        line: point.row as u32 + 1,
        col: (point.column + if point.row == 0 { bom } else { 0 }) as u32 + 1,
        message,
    };

    let mut parser = Parser::new();
    parser
        .set_language(tree_sitter_go::language())
        .map_err(|_| at(Point::default(), "go grammar unavailable".to_string()))?;
    let tree = parser
        .parse(body, None)
        .ok_or_else(|| at(Point::default(), "parse cancelled".to_string()))?;
    let root = tree.root_node();

    if let Some(node) = first_error(root) {
        let message = if node.is_missing() {
            format!("expected '{}'", node.kind())
        } else {
            format!("unexpected {}", first_token(node, body))
        };
        return Err(at(node.start_position(), message));
    }

    let mut cursor = root.walk();
    let top: Vec<Node<'_>> = root
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect();

    let mut rest = match top.split_first() {
        Some((first, rest)) if first.kind() == "package_clause" => rest.iter(),
        Some((first, _)) => {
            return Err(at(
                first.start_position(),
                format!("expected 'package', found {}", first_token(*first, body)),
            ));
        }
        None => {
            return Err(at(
                root.end_position(),
                "expected 'package', found 'EOF'".to_string(),
            ));
        }
    };

    let mut imports = Vec::new();
    for decl in rest.by_ref() {
        if decl.kind() != "import_declaration" {
            if !DECLARATIONS.contains(&decl.kind()) {
                return Err(at(
                    decl.start_position(),
                    format!("expected declaration, found {}", first_token(*decl, body)),
                ));
            }
            break;
        }
        import_specs(*decl, body, &mut imports).map_err(|(point, msg)| at(point, msg))?;
    }

    for decl in rest {
        if !DECLARATIONS.contains(&decl.kind()) {
            return Err(at(
                decl.start_position(),
                format!("expected declaration, found {}", first_token(*decl, body)),
            ));
        }
    }

    Ok(imports)
}

/// First `ERROR` or `MISSING` node in document order.
fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    if !root.has_error() {
        return None;
    }
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

fn import_specs(
    decl: Node<'_>,
    src: &str,
    out: &mut Vec<ImportRef>,
) -> Result<(), (Point, String)> {
    let mut cursor = decl.walk();
    let mut specs = Vec::new();
    for child in decl.named_children(&mut cursor) {
        match child.kind() {
            "import_spec" => specs.push(child),
            "import_spec_list" => {
                let mut inner = child.walk();
                specs.extend(
                    child
                        .named_children(&mut inner)
                        .filter(|n| n.kind() == "import_spec"),
                );
            }
            _ => {}
        }
    }

    for spec in specs {
        let Some(path) = spec.child_by_field_name("path") else {
            return Err((spec.start_position(), "missing import path".to_string()));
        };
        let literal = path.utf8_text(src.as_bytes()).unwrap_or_default();
        match unquote(literal) {
            Some(value) if is_valid_import(&value) => out.push(ImportRef {
                path: value,
                line: spec.start_position().row as u32 + 1,
            }),
            _ => {
                return Err((
                    path.start_position(),
                    format!("invalid import path: {literal}"),
                ));
            }
        }
    }
    Ok(())
}

/// The node's first word, quoted, for error messages.
fn first_token(node: Node<'_>, src: &str) -> String {
    let text = node.utf8_text(src.as_bytes()).unwrap_or_default();
    match text.split_whitespace().next() {
        Some(word) => format!("'{}'", word.chars().take(24).collect::<String>()),
        None => "'EOF'".to_string(),
    }
}

/// Decode a Go string literal. `None` for malformed escapes or non-UTF-8 byte escapes.
fn unquote(literal: &str) -> Option<String> {
    if let Some(raw) = literal
        .strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
    {
        return Some(raw.replace('\r', ""));
    }

    let body = literal.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let decoded = match chars.next()? {
            'a' => '\u{7}',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{b}',
            '\\' => '\\',
            '"' => '"',
            'x' => ascii(digits(&mut chars, 2, 16)?)?,
            'u' => char::from_u32(digits(&mut chars, 4, 16)?)?,
            'U' => char::from_u32(digits(&mut chars, 8, 16)?)?,
            d @ '0'..='7' => {
                let rest = digits(&mut chars, 2, 8)?;
                ascii(d.to_digit(8)? * 64 + rest)?
            }
            _ => return None,
        };
        out.push(decoded);
    }
    Some(out)
}

fn digits(chars: &mut std::str::Chars<'_>, count: usize, radix: u32) -> Option<u32> {
    (0..count).try_fold(0u32, |acc, _| Some(acc * radix + chars.next()?.to_digit(radix)?))
}

/// Byte escapes above 0x7f would not form valid UTF-8 on their own.
fn ascii(value: u32) -> Option<char> {
    (value < 0x80).then(|| char::from_u32(value)).flatten()
}

fn is_valid_import(path: &str) -> bool {
    const ILLEGAL: &str = "!\"#$%&'()*,:;<=>?[\\]^{|}`\u{FFFD}";
    !path.is_empty()
        && path
            .chars()
            .all(|c| !c.is_control() && !c.is_whitespace() && !ILLEGAL.contains(c))
}
