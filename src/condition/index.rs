//! Alias index over check results.

use std::collections::HashMap;

use crate::checks::CheckResult;
use crate::error::{ProbeError, Result};

use super::Expression;

/// How an alias was registered. Lower tiers win lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tier {
    Key,
    Define,
    Subst,
    Name,
}

/// Maps every alias of a result (lookup key, define, subst, name) to that
/// result.
///
/// Lookups prefer an explicit key, then a define name, then a subst name,
/// then a result name.
#[derive(Debug, Clone, Default)]
pub struct ResultIndex {
    results: Vec<CheckResult>,
    aliases: HashMap<String, (Tier, usize)>,
}

impl ResultIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from results registered by their own aliases.
    pub fn from_results(results: impl IntoIterator<Item = CheckResult>) -> Self {
        let mut index = Self::new();
        for result in results {
            index.insert(result);
        }
        index
    }

    /// Register a result under its define, subst and name.
    ///
    /// Returns the slot the result was stored in.
    pub fn insert(&mut self, result: CheckResult) -> usize {
        let slot = self.push(result);
        let result = &self.results[slot];
        let aliases: Vec<(String, Tier)> = [
            (result.define.clone(), Tier::Define),
            (result.subst.clone(), Tier::Subst),
            (Some(result.name.clone()), Tier::Name),
        ]
        .into_iter()
        .filter_map(|(alias, tier)| alias.map(|a| (a, tier)))
        .collect();

        for (alias, tier) in aliases {
            self.alias(alias, tier, slot);
        }
        slot
    }

    /// Register a result under an explicit lookup key as well as its aliases.
    pub fn insert_keyed(&mut self, key: &str, result: CheckResult) -> usize {
        let slot = self.insert(result);
        self.add_key(key, slot);
        slot
    }

    /// Point an explicit lookup key at an already stored result.
    pub fn add_key(&mut self, key: &str, slot: usize) {
        self.alias(key.to_string(), Tier::Key, slot);
    }

    fn push(&mut self, result: CheckResult) -> usize {
        self.results.push(result);
        self.results.len() - 1
    }

    fn alias(&mut self, alias: String, tier: Tier, slot: usize) {
        match self.aliases.get(&alias) {
            Some((existing, _)) if *existing <= tier => {}
            _ => {
                self.aliases.insert(alias, (tier, slot));
            }
        }
    }

    /// Find a result by any alias.
    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.aliases.get(name).map(|(_, slot)| &self.results[*slot])
    }

    /// Find a result by any alias, failing with the list of known aliases.
    pub fn resolve(&self, check: &str, name: &str) -> Result<&CheckResult> {
        self.get(name)
            .ok_or_else(|| ProbeError::UnresolvedDependency {
                check: check.to_string(),
                name: name.to_string(),
                available: self.available(),
            })
    }

    /// Evaluate an expression on behalf of `check`.
    pub fn evaluate(&self, check: &str, expression: &Expression) -> Result<bool> {
        let result = self.resolve(check, &expression.name)?;
        Ok(expression.evaluate(result))
    }

    /// All indexed results in insertion order.
    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    fn available(&self) -> String {
        let mut names: Vec<&str> = self.aliases.keys().map(String::as_str).collect();
        names.sort_unstable();
        if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        }
    }
}
