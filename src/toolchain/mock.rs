//! Scripted toolchain for testing.
//!
//! `ScriptedToolchain` decides outcomes by looking for marker substrings in
//! the test source and records every invocation for later assertion.
//!
//! # Example
//!
//! ```
//! use probeconf::checks::Language;
//! use probeconf::toolchain::{ScriptedToolchain, TestProgram, Toolchain};
//!
//! let toolchain = ScriptedToolchain::new().accept("<stdio.h>");
//! let ok = TestProgram::new("stdio", Language::C, "#include <stdio.h>\n");
//! let bad = TestProgram::new("nope", Language::C, "#include <nope.h>\n");
//!
//! assert!(toolchain.compile(&ok));
//! assert!(!toolchain.compile(&bad));
//! assert_eq!(toolchain.invocations().len(), 2);
//! ```

use std::cell::RefCell;

use crate::checks::Language;

use super::{TestProgram, Toolchain};

/// Which toolchain capability was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Compile,
    Link,
    LinkWithLibrary,
    Run,
}

/// One recorded toolchain call.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub capability: Capability,
    pub id: String,
    pub language: Language,
    pub source: String,
    pub library: Option<String>,
}

/// Toolchain double driven by source markers.
///
/// By default every build fails. A build succeeds when its source contains
/// an accepted marker and no rejected marker.
#[derive(Debug, Default)]
pub struct ScriptedToolchain {
    accept_all: bool,
    accepted: Vec<String>,
    rejected: Vec<String>,
    libraries: Vec<String>,
    exit_codes: Vec<(String, i32)>,
    invocations: RefCell<Vec<Invocation>>,
}

impl ScriptedToolchain {
    /// A toolchain on which nothing builds.
    pub fn new() -> Self {
        Self::default()
    }

    /// A toolchain on which everything not rejected builds.
    pub fn accepting_all() -> Self {
        Self {
            accept_all: true,
            ..Default::default()
        }
    }

    /// Sources containing `marker` build.
    pub fn accept(mut self, marker: &str) -> Self {
        self.accepted.push(marker.to_string());
        self
    }

    /// Sources containing `marker` never build.
    pub fn reject(mut self, marker: &str) -> Self {
        self.rejected.push(marker.to_string());
        self
    }

    /// Linking against `library` succeeds.
    pub fn with_library(mut self, library: &str) -> Self {
        self.libraries.push(library.to_string());
        self
    }

    /// Programs containing `marker` run and exit with `code`.
    pub fn exit_code(mut self, marker: &str, code: i32) -> Self {
        self.exit_codes.push((marker.to_string(), code));
        self
    }

    /// All recorded calls, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    /// Sources of all recorded calls, in order.
    pub fn sources(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .map(|invocation| invocation.source.clone())
            .collect()
    }

    fn record(&self, capability: Capability, program: &TestProgram<'_>, library: Option<&str>) {
        self.invocations.borrow_mut().push(Invocation {
            capability,
            id: program.id.to_string(),
            language: program.language,
            source: program.source.to_string(),
            library: library.map(str::to_string),
        });
    }

    fn builds(&self, source: &str) -> bool {
        if self.rejected.iter().any(|marker| source.contains(marker.as_str())) {
            return false;
        }
        self.accept_all || self.accepted.iter().any(|marker| source.contains(marker.as_str()))
    }
}

impl Toolchain for ScriptedToolchain {
    fn compile(&self, program: &TestProgram<'_>) -> bool {
        self.record(Capability::Compile, program, None);
        self.builds(program.source)
    }

    fn compile_and_link(&self, program: &TestProgram<'_>) -> bool {
        self.record(Capability::Link, program, None);
        self.builds(program.source)
    }

    fn compile_link_with_library(&self, program: &TestProgram<'_>, library: &str) -> bool {
        self.record(Capability::LinkWithLibrary, program, Some(library));
        self.libraries.iter().any(|known| known == library)
            && !self
                .rejected
                .iter()
                .any(|marker| program.source.contains(marker.as_str()))
    }

    fn compile_link_and_run(&self, program: &TestProgram<'_>) -> Option<i32> {
        self.record(Capability::Run, program, None);
        self.exit_codes
            .iter()
            .find(|(marker, _)| program.source.contains(marker.as_str()))
            .map(|(_, code)| *code)
    }
}
