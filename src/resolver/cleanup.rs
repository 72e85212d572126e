//! Trailing-whitespace cleanup of generated output.

use std::sync::LazyLock;

use regex::Regex;

/// Lines whose trailing form is significant: `#define NAME /**/` and
/// `#define NAME ` with only whitespace after the name.
static KEEP_TRAILING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#define +[A-Za-z_][A-Za-z0-9_]*(?: /\*\*/|[ \t]+)$")
        .expect("KEEP_TRAILING regex must compile")
});

/// Strip trailing spaces and tabs from every line except empty-define lines.
pub fn strip_trailing_whitespace(content: &str) -> String {
    content
        .split('\n')
        .map(|line| {
            if KEEP_TRAILING.is_match(line) {
                line
            } else {
                line.trim_end_matches([' ', '\t'])
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Give `output` a trailing newline exactly when `template` has one.
pub fn match_trailing_newline(template: &str, mut output: String) -> String {
    if template.ends_with('\n') {
        if !output.ends_with('\n') {
            output.push('\n');
        }
    } else {
        let trimmed = output.trim_end_matches('\n').len();
        output.truncate(trimmed);
    }
    output
}
