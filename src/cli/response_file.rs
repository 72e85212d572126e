//! `@FILE` response-file expansion.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{ProbeError, Result};

/// Expand a lone `@FILE` argument into one argument per non-empty line.
///
/// Any other argument list is returned unchanged.
pub fn expand_response_file(args: Vec<String>) -> Result<Vec<String>> {
    if args.len() != 2 {
        return Ok(args);
    }
    let Some(path) = args[1].strip_prefix('@').map(PathBuf::from) else {
        return Ok(args);
    };

    let content = fs::read_to_string(&path).map_err(|e| ProbeError::ReadFailed {
        path: path.clone(),
        message: e.to_string(),
    })?;

    let mut expanded = vec![args[0].clone()];
    expanded.extend(
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string),
    );
    debug!("Expanded {} into {} argument(s)", path.display(), expanded.len() - 1);
    Ok(expanded)
}
