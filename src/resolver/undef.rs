//! `#undef NAME` rewriting.
//!
//! The template is scanned once. At each `#` the scanner tries to match
//! `#<spacing>undef<whitespace><identifier><newlines>`; the identifier
//! ends at the newline, so `HAVE_FOO` never matches inside `HAVE_FOO_BAR`.

use std::collections::HashMap;

use crate::checks::CheckResult;

/// What a matched `#undef` becomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// `#define NAME VALUE`; an empty value renders as `/**/`, or as a
    /// trailing space when `unquote` is set.
    Define { value: String, unquote: bool },
    /// `/* #undef NAME */`.
    Comment,
}

impl Replacement {
    pub fn for_result(result: &CheckResult) -> Self {
        if result.should_emit_define() {
            Self::Define {
                value: result.value.render_define(),
                unquote: result.unquote,
            }
        } else {
            Self::Comment
        }
    }

    fn render(&self, spacing: &str, name: &str) -> String {
        match self {
            Self::Define { value, .. } if !value.is_empty() => {
                format!("#{}define {} {}", spacing, name, value)
            }
            Self::Define { unquote: true, .. } => format!("#{}define {} ", spacing, name),
            Self::Define { .. } => format!("#{}define {} /**/", spacing, name),
            Self::Comment => format!("/* #{}undef {} */", spacing, name),
        }
    }
}

/// How to treat an `#undef` whose name is not in the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unknown {
    Comment,
    Keep,
}

/// A structurally matched `#undef` line.
struct UndefLine<'a> {
    spacing: &'a str,
    name: &'a str,
    newlines: &'a str,
    len: usize,
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn span(bytes: &[u8], from: usize, pred: impl Fn(u8) -> bool) -> usize {
    bytes[from..].iter().take_while(|&&b| pred(b)).count()
}

/// Match the grammar at `start`, which must point at `#`.
fn match_undef(content: &str, start: usize) -> Option<UndefLine<'_>> {
    let bytes = content.as_bytes();
    let mut pos = start + 1;

    let spacing_len = span(bytes, pos, |b| b == b' ' || b == b'\t');
    let spacing = &content[pos..pos + spacing_len];
    pos += spacing_len;

    if !bytes[pos..].starts_with(b"undef") {
        return None;
    }
    pos += "undef".len();

    let gap = span(bytes, pos, |b| b == b' ' || b == b'\t');
    if gap == 0 {
        return None;
    }
    pos += gap;

    if !bytes.get(pos).copied().is_some_and(is_ident_start) {
        return None;
    }
    let name_len = span(bytes, pos, is_ident_char);
    let name = &content[pos..pos + name_len];
    pos += name_len;

    let newline_len = span(bytes, pos, |b| b == b'\n');
    if newline_len == 0 {
        return None;
    }
    let newlines = &content[pos..pos + newline_len];
    pos += newline_len;

    Some(UndefLine {
        spacing,
        name,
        newlines,
        len: pos - start,
    })
}

/// Rewrite every `#undef` in one pass.
pub fn rewrite_undefs(
    content: &str,
    replacements: &HashMap<String, Replacement>,
    unknown: Unknown,
) -> String {
    let comment = Replacement::Comment;
    let mut out = String::with_capacity(content.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(offset) = content[pos..].find('#') {
        let start = pos + offset;
        let Some(line) = match_undef(content, start) else {
            pos = start + 1;
            continue;
        };

        let replacement = match replacements.get(line.name) {
            Some(replacement) => Some(replacement),
            None if unknown == Unknown::Comment => Some(&comment),
            None => None,
        };
        if let Some(replacement) = replacement {
            out.push_str(&content[copied..start]);
            out.push_str(&replacement.render(line.spacing, line.name));
            out.push_str(line.newlines);
            copied = start + line.len;
        }
        pos = start + line.len;
    }

    out.push_str(&content[copied..]);
    out
}
