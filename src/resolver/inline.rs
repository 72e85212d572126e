//! Verbatim text replacement passes run before `#undef` and `@VAR@`
//! processing.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{ProbeError, Result};

/// Replace every occurrence of each search string with a literal value.
pub fn apply_direct(content: &str, substitutions: &[(String, String)]) -> String {
    let mut out = content.to_string();
    for (search, replacement) in substitutions {
        if search.is_empty() {
            continue;
        }
        out = out.replace(search.as_str(), replacement);
    }
    out
}

/// Replace every occurrence of each search string with a file's contents.
///
/// Matches are collected front to back against the original text and
/// replaced back to front; a match overlapping an earlier one is dropped.
pub fn apply_inline(content: &str, substitutions: &[(String, PathBuf)]) -> Result<String> {
    let mut bodies = Vec::with_capacity(substitutions.len());
    for (_, path) in substitutions {
        let body = fs::read_to_string(path).map_err(|e| ProbeError::ReadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        bodies.push(body);
    }

    let mut matches: Vec<(usize, usize, usize)> = substitutions
        .iter()
        .enumerate()
        .filter(|(_, (search, _))| !search.is_empty())
        .flat_map(|(i, (search, _))| {
            content
                .match_indices(search.as_str())
                .map(move |(pos, found)| (pos, found.len(), i))
        })
        .collect();
    matches.sort_by_key(|&(pos, _, i)| (pos, i));

    let mut kept: Vec<(usize, usize, usize)> = Vec::with_capacity(matches.len());
    for m in matches {
        if kept.last().is_none_or(|&(pos, len, _)| m.0 >= pos + len) {
            kept.push(m);
        }
    }
    debug!("Inlining {} occurrence(s)", kept.len());

    let mut out = content.to_string();
    for &(pos, len, i) in kept.iter().rev() {
        out.replace_range(pos..pos + len, &bodies[i]);
    }
    Ok(out)
}
