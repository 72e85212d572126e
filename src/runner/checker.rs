//! `check` entry point: load inputs, run checks, write the result file.

use std::path::PathBuf;

use tracing::debug;

use crate::checks::{write_results, Check, CheckResult};
use crate::condition::ResultIndex;
use crate::error::{ProbeError, Result};
use crate::toolchain::{CompilerToolchain, Toolchain, ToolchainConfig};
use crate::ui::UserInterface;

use super::check_runner::CheckRunner;
use super::dependencies::{Dependencies, DependencySpec};

/// Inputs of one `check` invocation.
#[derive(Debug, Clone)]
pub struct CheckRequest {
    /// Toolchain configuration file.
    pub config: PathBuf,
    /// Single check description; when `None` the config's `checks` run.
    pub check: Option<PathBuf>,
    /// Result file to write.
    pub results: PathBuf,
    pub dependencies: Vec<DependencySpec>,
}

/// Run `checks` in order against `toolchain`.
pub fn run_checks(
    toolchain: &dyn Toolchain,
    dependencies: ResultIndex,
    checks: &[Check],
    ui: &mut dyn UserInterface,
) -> Result<Vec<CheckResult>> {
    let mut runner = CheckRunner::new(toolchain, dependencies, ui);
    runner.run_all(checks)
}

/// Execute a `check` request with the configured compiler.
pub fn run(request: &CheckRequest, ui: &mut dyn UserInterface) -> Result<Vec<CheckResult>> {
    let config = ToolchainConfig::load(&request.config)?;
    let checks = match &request.check {
        Some(path) => vec![Check::load(path)?],
        None => config.checks()?,
    };
    if checks.is_empty() {
        return Err(ProbeError::InvalidArguments {
            message: format!(
                "no --check given and {} lists no checks",
                request.config.display()
            ),
        });
    }

    let dependencies = Dependencies::load(&request.dependencies)?;
    debug!(
        "Running {} check(s) with {} dependency result(s)",
        checks.len(),
        dependencies.len()
    );

    let toolchain = CompilerToolchain::new(config);
    let results = run_checks(&toolchain, dependencies, &checks, ui)?;
    write_results(&request.results, &results)?;
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{read_results, Value};
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, checks: &str) -> PathBuf {
        let path = dir.path().join("toolchain.json");
        fs::write(
            &path,
            format!(
                r#"{{"c_compiler": "/nonexistent/cc", "cpp_compiler": "/nonexistent/c++", "checks": {}}}"#,
                checks
            ),
        )
        .unwrap();
        path
    }

    #[test]
    fn batch_runs_config_checks() {
        let dir = TempDir::new().unwrap();
        let config = write_config(
            &dir,
            r#"[
                {"type": "define", "name": "_GNU_SOURCE", "define_value": "1"},
                {"type": "define", "name": "USE_GNU", "condition": "_GNU_SOURCE", "define_value": "1"}
            ]"#,
        );
        let request = CheckRequest {
            config,
            check: None,
            results: dir.path().join("out.json"),
            dependencies: vec![],
        };

        let mut ui = MockUI::new();
        let results = run(&request, &mut ui).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[1].success);

        let written = read_results(&request.results).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0].value, Value::integer(1));
    }

    #[test]
    fn single_check_file_overrides_config_checks() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, "[]");
        let check = dir.path().join("check.json");
        fs::write(&check, r#"{"type": "header", "name": "stdio.h", "define": "HAVE_STDIO_H"}"#).unwrap();

        let request = CheckRequest {
            config,
            check: Some(check),
            results: dir.path().join("out.json"),
            dependencies: vec![],
        };

        let mut ui = MockUI::new();
        let results = run(&request, &mut ui).unwrap();
        // the compiler does not exist, which is a probe failure
        assert!(!results[0].success);
        assert_eq!(ui.status_lines(), vec!["checking HAVE_STDIO_H... no".to_string()]);
    }

    #[test]
    fn nothing_to_run_is_an_error() {
        let dir = TempDir::new().unwrap();
        let request = CheckRequest {
            config: write_config(&dir, "[]"),
            check: None,
            results: dir.path().join("out.json"),
            dependencies: vec![],
        };
        let err = run(&request, &mut MockUI::new()).unwrap_err();
        assert!(matches!(err, ProbeError::InvalidArguments { .. }));
    }
}
