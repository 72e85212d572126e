//! The compiler toolchain collaborator.
//!
//! Check policies never spawn processes themselves; they hand a
//! [`TestProgram`] to a [`Toolchain`] and interpret the outcome.
//!
//! - [`CompilerToolchain`] - drives a real compiler from a [`ToolchainConfig`]
//! - [`ScriptedToolchain`] - deterministic test double
//! - [`flags`] - warning-escalation flag filtering
//! - [`process`] - subprocess execution with timeouts

pub mod compiler;
pub mod config;
pub mod flags;
pub mod mock;
pub mod process;

pub use compiler::CompilerToolchain;
pub use config::ToolchainConfig;
pub use flags::filter_error_flags;
pub use mock::{Capability, Invocation, ScriptedToolchain};

use crate::checks::Language;

/// A test program to build.
#[derive(Debug, Clone, Copy)]
pub struct TestProgram<'a> {
    /// Unique identifier of the check, used to name artifacts.
    pub id: &'a str,
    pub language: Language,
    pub source: &'a str,
}

impl<'a> TestProgram<'a> {
    pub fn new(id: &'a str, language: Language, source: &'a str) -> Self {
        Self {
            id,
            language,
            source,
        }
    }
}

/// Compile, link and run capabilities used by check policies.
///
/// Implementations report failure (including a missing compiler) through
/// their return value; they never abort the check.
pub trait Toolchain {
    /// Compile only.
    fn compile(&self, program: &TestProgram<'_>) -> bool;

    /// Compile and link an executable.
    fn compile_and_link(&self, program: &TestProgram<'_>) -> bool;

    /// Compile and link against `library`.
    fn compile_link_with_library(&self, program: &TestProgram<'_>, library: &str) -> bool;

    /// Compile, link and run; returns the program's exit status.
    fn compile_link_and_run(&self, program: &TestProgram<'_>) -> Option<i32>;
}

/// Make a check identifier safe to use in file names.
pub fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}
