//! `@NAME@` substitution.

use std::collections::HashMap;

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Replace every `@NAME@` whose name is in `values`, in one pass.
///
/// An `@` that does not open a known placeholder is copied and scanning
/// resumes right after it.
pub fn substitute_vars(content: &str, values: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(at) = rest.find('@') {
        out.push_str(&rest[..at]);
        let after = &rest[at + 1..];

        let replaced = after.find('@').and_then(|close| {
            let name = &after[..close];
            if !is_identifier(name) {
                return None;
            }
            values.get(name).map(|value| (value, close))
        });

        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('@');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
