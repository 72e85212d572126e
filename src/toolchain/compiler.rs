//! Process-backed toolchain.
//!
//! Every capability call gets its own scratch directory, named after the
//! check identifier, which is removed when the call returns on any path.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::checks::Language;

use super::process::{display_command, execute, CommandOptions};
use super::{sanitize_id, Toolchain, TestProgram, ToolchainConfig};

/// Drives the configured C/C++ compiler.
#[derive(Debug, Clone)]
pub struct CompilerToolchain {
    config: ToolchainConfig,
    scratch_root: Option<PathBuf>,
}

/// Scratch directory plus the artifact stem inside it.
struct Scratch {
    dir: TempDir,
    stem: String,
}

impl Scratch {
    fn path(&self, extension: &str) -> PathBuf {
        self.dir.path().join(format!("{}{}", self.stem, extension))
    }

    fn executable(&self) -> PathBuf {
        self.path(std::env::consts::EXE_SUFFIX)
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl CompilerToolchain {
    pub fn new(config: ToolchainConfig) -> Self {
        Self {
            config,
            scratch_root: None,
        }
    }

    /// Create scratch directories under `root` instead of the system temp dir.
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    pub fn config(&self) -> &ToolchainConfig {
        &self.config
    }

    fn object_extension(&self) -> &'static str {
        if self.config.is_msvc() {
            ".obj"
        } else {
            ".o"
        }
    }

    /// Create the scratch directory and write the test source into it.
    fn prepare(&self, program: &TestProgram<'_>) -> Option<(Scratch, PathBuf)> {
        let stem = sanitize_id(program.id);
        let prefix = format!("{}.", stem);
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix);
        let created = match &self.scratch_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        };
        let dir = match created {
            Ok(dir) => dir,
            Err(e) => {
                warn!("Failed to create scratch directory for {}: {}", program.id, e);
                return None;
            }
        };

        let scratch = Scratch { dir, stem };
        let source = scratch.path(&format!(".{}", program.language.extension()));
        if let Err(e) = std::fs::write(&source, program.source) {
            warn!("Failed to write test source for {}: {}", program.id, e);
            return None;
        }
        Some((scratch, source))
    }

    fn options(&self, scratch: &Scratch) -> CommandOptions {
        CommandOptions {
            cwd: Some(scratch.dir.path().to_path_buf()),
            timeout: self.config.timeout(),
        }
    }

    /// Run a tool; spawn failures count as a failed probe.
    fn run_tool(&self, tool: &str, args: &[String], scratch: &Scratch) -> bool {
        match execute(tool, args, &self.options(scratch)) {
            Ok(result) => {
                if !result.success {
                    debug!(
                        "{} exited with {:?}",
                        display_command(tool, args),
                        result.exit_code
                    );
                }
                result.success
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    /// Compile `source` to an object file inside `scratch`.
    fn compile_object(
        &self,
        language: Language,
        source: &Path,
        scratch: &Scratch,
    ) -> Option<PathBuf> {
        let object = scratch.path(self.object_extension());
        let mut args = self.config.compile_flags(language);
        if self.config.is_msvc() {
            args.push("/c".to_string());
            args.push(format!("/Fo{}", path_arg(&object)));
            args.push(path_arg(source));
        } else {
            args.push("-c".to_string());
            args.push(path_arg(source));
            args.push("-o".to_string());
            args.push(path_arg(&object));
        }

        self.run_tool(self.config.compiler(language), &args, scratch)
            .then_some(object)
    }

    /// Link an object file into `executable`.
    fn link_object(
        &self,
        language: Language,
        object: &Path,
        executable: &Path,
        scratch: &Scratch,
    ) -> bool {
        let mut args = self.config.link_flags(language);
        if self.config.is_msvc() {
            args.push(format!("/OUT:{}", path_arg(executable)));
            args.push(path_arg(object));
        } else {
            args.push(path_arg(object));
            args.push("-o".to_string());
            args.push(path_arg(executable));
        }

        self.run_tool(self.config.link_tool(language), &args, scratch)
    }

    /// Build an executable, returning its path inside `scratch`.
    fn build_executable(
        &self,
        language: Language,
        source: &Path,
        scratch: &Scratch,
    ) -> Option<PathBuf> {
        let object = self.compile_object(language, source, scratch)?;
        let executable = scratch.executable();
        self.link_object(language, &object, &executable, scratch)
            .then_some(executable)
    }
}

impl Toolchain for CompilerToolchain {
    fn compile(&self, program: &TestProgram<'_>) -> bool {
        let Some((scratch, source)) = self.prepare(program) else {
            return false;
        };
        self.compile_object(program.language, &source, &scratch)
            .is_some()
    }

    fn compile_and_link(&self, program: &TestProgram<'_>) -> bool {
        let Some((scratch, source)) = self.prepare(program) else {
            return false;
        };
        self.build_executable(program.language, &source, &scratch)
            .is_some()
    }

    fn compile_link_with_library(&self, program: &TestProgram<'_>, library: &str) -> bool {
        let Some((scratch, source)) = self.prepare(program) else {
            return false;
        };
        let executable = scratch.executable();
        let mut args = self.config.compile_flags(program.language);
        args.extend(self.config.link_flags(program.language));
        if self.config.is_msvc() {
            args.push(format!("/Fe{}", path_arg(&executable)));
            args.push(path_arg(&source));
            args.push(format!("{}.lib", library));
        } else {
            args.push(path_arg(&source));
            args.push("-o".to_string());
            args.push(path_arg(&executable));
            args.push(format!("-l{}", library));
        }

        self.run_tool(self.config.compiler(program.language), &args, &scratch)
    }

    fn compile_link_and_run(&self, program: &TestProgram<'_>) -> Option<i32> {
        let (scratch, source) = self.prepare(program)?;
        let executable = self.build_executable(program.language, &source, &scratch)?;

        match execute(&path_arg(&executable), &[], &self.options(&scratch)) {
            Ok(result) => {
                debug!("{} exited with {:?}", program.id, result.exit_code);
                result.exit_code
            }
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }
}
