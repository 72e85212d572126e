//! Check command implementation.
//!
//! The `probeconf check` command runs one check (or the config's batch of
//! checks) and writes their results to a result file.

use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::runner::{checker, CheckRequest, DependencySpec};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(args: CheckArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    fn request(&self) -> Result<CheckRequest> {
        let dependencies = self
            .args
            .deps
            .iter()
            .map(|dep| dep.parse::<DependencySpec>())
            .collect::<Result<Vec<_>>>()?;

        Ok(CheckRequest {
            config: self.args.config.clone(),
            check: self.args.check.clone(),
            results: self.args.results.clone(),
            dependencies,
        })
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let request = self.request()?;
        let results = checker::run(&request, ui)?;

        if ui.output_mode().shows_check_status() {
            let found = results.iter().filter(|result| result.success).count();
            ui.success(&format!(
                "{} of {} check(s) succeeded; results written to {}",
                found,
                results.len(),
                request.results.display()
            ));
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::read_results;
    use crate::error::ProbeError;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn args(dir: &TempDir) -> CheckArgs {
        let config = dir.path().join("toolchain.json");
        fs::write(&config, r#"{"c_compiler": "cc", "cpp_compiler": "c++"}"#).unwrap();
        let check = dir.path().join("check.json");
        fs::write(
            &check,
            r#"{"type": "define", "name": "HAVE_THREADS", "define_value": "1"}"#,
        )
        .unwrap();
        CheckArgs {
            config,
            check: Some(check),
            results: dir.path().join("out.json"),
            deps: vec![],
        }
    }

    #[test]
    fn writes_results() {
        let dir = TempDir::new().unwrap();
        let args = args(&dir);
        let results_path = args.results.clone();

        let mut ui = MockUI::new();
        let result = CheckCommand::new(args).execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(read_results(&results_path).unwrap().len(), 1);
        assert_eq!(ui.successes().len(), 1);
    }

    #[test]
    fn malformed_dependency_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir);
        args.deps = vec!["=oops.json".into()];

        let err = CheckCommand::new(args).execute(&mut MockUI::new()).unwrap_err();
        assert!(matches!(err, ProbeError::InvalidArguments { .. }));
    }
}
