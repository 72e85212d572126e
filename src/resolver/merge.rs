//! Merging result files into buckets.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;

use crate::checks::{read_results, CheckResult};
use crate::error::{ProbeError, Result};

/// Merge result lists by name, keeping first-seen order.
///
/// A name seen twice must agree on `success` and `value`; anything else is
/// a conflict, never a silent override.
pub fn merge_results(lists: impl IntoIterator<Item = Vec<CheckResult>>) -> Result<Vec<CheckResult>> {
    let mut merged: Vec<CheckResult> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for result in lists.into_iter().flatten() {
        match positions.get(&result.name) {
            Some(&position) => {
                let existing = &merged[position];
                if existing.success != result.success || existing.value != result.value {
                    return Err(ProbeError::ConflictingResults {
                        name: result.name.clone(),
                        first: existing.summary(),
                        second: result.summary(),
                    });
                }
            }
            None => {
                positions.insert(result.name.clone(), merged.len());
                merged.push(result);
            }
        }
    }
    Ok(merged)
}

/// Read and merge every file of one bucket.
pub fn load_bucket(paths: &[PathBuf]) -> Result<Vec<CheckResult>> {
    let lists = paths
        .iter()
        .map(|path| read_results(path))
        .collect::<Result<Vec<_>>>()?;
    merge_results(lists)
}

/// Results partitioned by how they are used.
#[derive(Debug, Clone, Default)]
pub struct ResultBuckets {
    /// Lookup-only results; never rendered.
    pub cache: Vec<CheckResult>,
    /// Rendered through `#undef` lines.
    pub define: Vec<CheckResult>,
    /// Rendered through `@NAME@` placeholders.
    pub subst: Vec<CheckResult>,
}

impl ResultBuckets {
    pub fn load(cache: &[PathBuf], define: &[PathBuf], subst: &[PathBuf]) -> Result<Self> {
        let buckets = Self {
            cache: load_bucket(cache)?,
            define: load_bucket(define)?,
            subst: load_bucket(subst)?,
        };
        debug!(
            "Loaded {} cache, {} define, {} subst result(s)",
            buckets.cache.len(),
            buckets.define.len(),
            buckets.subst.len()
        );
        Ok(buckets)
    }

    /// Rendered results, for draining package builtins. The cache bucket
    /// is never rendered and so never drains one.
    pub fn explicit(&self) -> impl Iterator<Item = &CheckResult> {
        self.define.iter().chain(&self.subst)
    }
}
