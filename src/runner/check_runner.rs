//! Per-check state machine.
//!
//! A check is first gated by its `requires` list (skipped when any entry is
//! false), then either resolved from its `condition` without touching the
//! toolchain, or executed by its kind's policy. Either way it yields exactly
//! one result, which is added to the index for later checks.

use tracing::debug;

use crate::checks::{Check, CheckKind, CheckResult, Value};
use crate::condition::{Expression, ResultIndex};
use crate::error::Result;
use crate::toolchain::Toolchain;
use crate::ui::UserInterface;

use super::policy::{Policy, Probe, ProbePolicy};
use super::preamble::{carried_defines, requested_defines};

/// Runs checks against a toolchain, accumulating their results.
pub struct CheckRunner<'a> {
    toolchain: &'a dyn Toolchain,
    index: ResultIndex,
    ui: &'a mut dyn UserInterface,
}

impl<'a> CheckRunner<'a> {
    /// Create a runner seeded with dependency results.
    pub fn new(
        toolchain: &'a dyn Toolchain,
        dependencies: ResultIndex,
        ui: &'a mut dyn UserInterface,
    ) -> Self {
        Self {
            toolchain,
            index: dependencies,
            ui,
        }
    }

    /// Dependency results plus every result produced so far.
    pub fn index(&self) -> &ResultIndex {
        &self.index
    }

    pub fn into_index(self) -> ResultIndex {
        self.index
    }

    /// Run one check.
    ///
    /// Only structural problems are errors: an invalid check, a requirement
    /// or condition naming an unknown result, or a missing compile define.
    pub fn run(&mut self, check: &Check) -> Result<CheckResult> {
        check.validate()?;

        let result = if !self.requirements_met(check)? {
            debug!("Skipping {}: requirements not met", check.name);
            CheckResult::skipped(check)
        } else if let Some(condition) = &check.condition {
            self.resolve_condition(check, condition)?
        } else {
            self.execute(check)?
        };

        debug!("{}: {}", check.name, result.summary());
        self.ui.check_status(check.define_name(), result.success);
        self.index.insert(result.clone());
        Ok(result)
    }

    /// Run checks in order; each sees the results of those before it.
    pub fn run_all(&mut self, checks: &[Check]) -> Result<Vec<CheckResult>> {
        checks.iter().map(|check| self.run(check)).collect()
    }

    fn requirements_met(&self, check: &Check) -> Result<bool> {
        for requirement in &check.requires {
            let expression = Expression::parse(requirement)?;
            if !self.index.evaluate(check.define_name(), &expression)? {
                debug!("{}: requirement '{}' is false", check.name, expression);
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn resolve_condition(&self, check: &Check, condition: &str) -> Result<CheckResult> {
        let expression = Expression::parse(condition)?;
        let truth = self.index.evaluate(check.define_name(), &expression)?;
        let value = if truth {
            check.define_value.clone().unwrap_or(Value::Empty)
        } else {
            check.define_value_fail.clone().unwrap_or_default()
        };

        // Only Define checks may select an empty value
        if value.is_present() && (!value.is_empty() || check.kind == CheckKind::Define) {
            Ok(CheckResult::for_check(check, value, truth))
        } else {
            Ok(CheckResult::for_check(check, Value::Absent, false))
        }
    }

    fn execute(&self, check: &Check) -> Result<CheckResult> {
        let mut preamble = carried_defines(self.index.results());
        preamble.push_str(&requested_defines(check, &self.index)?);

        let probe = Probe::new(check, &preamble, self.toolchain);
        Ok(Policy::for_kind(check.kind).execute(&probe))
    }
}
