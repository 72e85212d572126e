//! Kind-specific check policies.
//!
//! Every [`CheckKind`] maps to exactly one policy through [`Policy::for_kind`].
//! A policy builds its test source, calls one toolchain capability and turns
//! the outcome into a [`CheckResult`]. Probe failures are results, never
//! errors.

use std::fs;

use tracing::{debug, warn};

use crate::checks::{Check, CheckKind, CheckResult, Value};
use crate::toolchain::{TestProgram, Toolchain};

use super::programs;

/// Everything a policy needs to execute one check.
pub struct Probe<'a> {
    pub check: &'a Check,
    /// `#define` lines prepended to every test source.
    pub preamble: &'a str,
    pub toolchain: &'a dyn Toolchain,
}

impl<'a> Probe<'a> {
    pub fn new(check: &'a Check, preamble: &'a str, toolchain: &'a dyn Toolchain) -> Self {
        Self {
            check,
            preamble,
            toolchain,
        }
    }

    /// Custom source from `code` or `file_path`, else `default`.
    ///
    /// `None` when `file_path` cannot be read.
    fn source(&self, default: impl FnOnce() -> String) -> Option<String> {
        if let Some(code) = &self.check.code {
            return Some(code.clone());
        }
        if let Some(path) = &self.check.file_path {
            return match fs::read_to_string(path) {
                Ok(content) => Some(content),
                Err(e) => {
                    warn!(
                        "Cannot read source for {} from {}: {}",
                        self.check.name,
                        path.display(),
                        e
                    );
                    None
                }
            };
        }
        Some(default())
    }

    fn full_source(&self, body: &str) -> String {
        format!("{}{}", self.preamble, body)
    }

    fn compile(&self, body: &str) -> bool {
        let source = self.full_source(body);
        self.toolchain
            .compile(&TestProgram::new(&self.check.name, self.check.language, &source))
    }

    fn link(&self, body: &str) -> bool {
        let source = self.full_source(body);
        self.toolchain
            .compile_and_link(&TestProgram::new(&self.check.name, self.check.language, &source))
    }

    fn link_with_library(&self, body: &str, library: &str) -> bool {
        let source = self.full_source(body);
        self.toolchain.compile_link_with_library(
            &TestProgram::new(&self.check.name, self.check.language, &source),
            library,
        )
    }

    fn run(&self, body: &str) -> Option<i32> {
        let source = self.full_source(body);
        self.toolchain
            .compile_link_and_run(&TestProgram::new(&self.check.name, self.check.language, &source))
    }

    /// Result with `define_value` on success and `define_value_fail` on
    /// failure, defaulting to `1` and `0`.
    fn outcome(&self, found: bool) -> CheckResult {
        let value = if found {
            self.check.define_value.clone().unwrap_or(Value::integer(1))
        } else {
            self.check
                .define_value_fail
                .clone()
                .unwrap_or(Value::integer(0))
        };
        CheckResult::for_check(self.check, value, found)
    }

    fn failed(&self) -> CheckResult {
        self.outcome(false)
    }
}

/// One way of executing a check.
pub trait ProbePolicy {
    fn execute(&self, probe: &Probe<'_>) -> CheckResult;
}

/// Does `#include <NAME>` compile?
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderProbe;

impl ProbePolicy for HeaderProbe {
    fn execute(&self, probe: &Probe<'_>) -> CheckResult {
        match probe.source(|| programs::header_program(&probe.check.name)) {
            Some(body) => probe.outcome(probe.compile(&body)),
            None => probe.failed(),
        }
    }
}

/// Does the function link?
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionProbe;

impl ProbePolicy for FunctionProbe {
    fn execute(&self, probe: &Probe<'_>) -> CheckResult {
        let function = programs::function_name(&probe.check.name);
        match probe.source(|| programs::function_program(function)) {
            Some(body) => probe.outcome(probe.link(&body)),
            None => probe.failed(),
        }
    }
}

/// Does the function link against `library`?
#[derive(Debug, Clone, Copy, Default)]
pub struct LibProbe;

impl ProbePolicy for LibProbe {
    fn execute(&self, probe: &Probe<'_>) -> CheckResult {
        let library = probe.check.library.as_deref().unwrap_or_default();
        let function = programs::library_function_name(&probe.check.name, library);
        match probe.source(|| programs::library_program(function)) {
            Some(body) => probe.outcome(probe.link_with_library(&body, library)),
            None => probe.failed(),
        }
    }
}

/// Is the symbol a macro or declaration?
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolProbe;

impl ProbePolicy for SymbolProbe {
    fn execute(&self, probe: &Probe<'_>) -> CheckResult {
        match probe.source(|| programs::symbol_program(&probe.check.name)) {
            Some(body) => probe.outcome(probe.compile(&body)),
            None => probe.failed(),
        }
    }
}

/// Is the type complete?
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeProbe;

impl ProbePolicy for TypeProbe {
    fn execute(&self, probe: &Probe<'_>) -> CheckResult {
        match probe.source(|| programs::type_program(&probe.check.name)) {
            Some(body) => probe.outcome(probe.compile(&body)),
            None => probe.failed(),
        }
    }
}

/// Does the struct member exist? The check supplies the code.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberProbe;

impl ProbePolicy for MemberProbe {
    fn execute(&self, probe: &Probe<'_>) -> CheckResult {
        match probe.source(|| programs::EMPTY_PROGRAM.to_string()) {
            Some(body) => probe.outcome(probe.compile(&body)),
            None => probe.failed(),
        }
    }
}

/// User-supplied source, compiled (Compile) or linked (Link).
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceProbe {
    pub link: bool,
}

impl ProbePolicy for SourceProbe {
    fn execute(&self, probe: &Probe<'_>) -> CheckResult {
        let Some(body) = probe.source(|| programs::EMPTY_PROGRAM.to_string()) else {
            return probe.failed();
        };
        let found = if self.link {
            probe.link(&body)
        } else {
            probe.compile(&body)
        };

        let check = probe.check;
        // Compile checks that only set a failure value define nothing on success
        if found
            && !self.link
            && check.define_value.is_none()
            && check.define_value_fail.is_some()
        {
            return CheckResult::for_check(check, Value::Absent, true);
        }
        probe.outcome(found)
    }
}

/// No compilation: `define_value` or empty, always successful.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefineProbe;

impl ProbePolicy for DefineProbe {
    fn execute(&self, probe: &Probe<'_>) -> CheckResult {
        let value = probe.check.define_value.clone().unwrap_or(Value::Empty);
        CheckResult::for_check(probe.check, value, true)
    }
}

/// Sizeof/Alignof: first candidate whose assertion compiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeSearchProbe;

impl ProbePolicy for SizeSearchProbe {
    fn execute(&self, probe: &Probe<'_>) -> CheckResult {
        let template = probe.check.code.as_deref().unwrap_or_default();
        for candidate in programs::SIZE_CANDIDATES {
            let body = programs::with_candidate(template, candidate);
            if probe.compile(&body) {
                debug!("{} matched candidate {}", probe.check.name, candidate);
                return CheckResult::for_check(
                    probe.check,
                    Value::integer(i64::from(candidate)),
                    true,
                );
            }
        }
        debug!("{} matched no candidate", probe.check.name);
        CheckResult::for_check(probe.check, Value::integer(0), false)
    }
}

/// ComputeInt/Endian: the program's exit status is the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunProbe;

impl ProbePolicy for RunProbe {
    fn execute(&self, probe: &Probe<'_>) -> CheckResult {
        let body = probe.check.code.as_deref().unwrap_or_default();
        match probe.run(body) {
            Some(code) => CheckResult::for_check(probe.check, Value::integer(i64::from(code)), true),
            None => CheckResult::for_check(probe.check, Value::integer(0), false),
        }
    }
}

/// Is the declaration visible? A missing declaration may still emit
/// `define_value_fail`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclProbe;

impl ProbePolicy for DeclProbe {
    fn execute(&self, probe: &Probe<'_>) -> CheckResult {
        let body = probe.check.code.as_deref().unwrap_or_default();
        let found = probe.compile(body);
        let value = if found {
            probe.check.define_value.clone().unwrap_or(Value::integer(1))
        } else {
            probe.check.define_value_fail.clone().unwrap_or_default()
        };
        CheckResult::for_check(probe.check, value, found)
    }
}

/// Closed set of policies, one per check kind.
#[derive(Debug, Clone, Copy)]
pub enum Policy {
    Header(HeaderProbe),
    Function(FunctionProbe),
    Lib(LibProbe),
    Symbol(SymbolProbe),
    Type(TypeProbe),
    Member(MemberProbe),
    Source(SourceProbe),
    Define(DefineProbe),
    SizeSearch(SizeSearchProbe),
    Run(RunProbe),
    Decl(DeclProbe),
}

impl Policy {
    pub fn for_kind(kind: CheckKind) -> Self {
        match kind {
            CheckKind::Header => Self::Header(HeaderProbe),
            CheckKind::Function => Self::Function(FunctionProbe),
            CheckKind::Lib => Self::Lib(LibProbe),
            CheckKind::Symbol => Self::Symbol(SymbolProbe),
            CheckKind::Type => Self::Type(TypeProbe),
            CheckKind::Member => Self::Member(MemberProbe),
            CheckKind::Compile => Self::Source(SourceProbe { link: false }),
            CheckKind::Link => Self::Source(SourceProbe { link: true }),
            CheckKind::Define | CheckKind::SubstOnly => Self::Define(DefineProbe),
            CheckKind::Sizeof | CheckKind::Alignof => Self::SizeSearch(SizeSearchProbe),
            CheckKind::ComputeInt | CheckKind::Endian => Self::Run(RunProbe),
            CheckKind::Decl => Self::Decl(DeclProbe),
        }
    }

    fn policy(&self) -> &dyn ProbePolicy {
        match self {
            Self::Header(p) => p,
            Self::Function(p) => p,
            Self::Lib(p) => p,
            Self::Symbol(p) => p,
            Self::Type(p) => p,
            Self::Member(p) => p,
            Self::Source(p) => p,
            Self::Define(p) => p,
            Self::SizeSearch(p) => p,
            Self::Run(p) => p,
            Self::Decl(p) => p,
        }
    }
}

impl ProbePolicy for Policy {
    fn execute(&self, probe: &Probe<'_>) -> CheckResult {
        self.policy().execute(probe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolchain::{Capability, ScriptedToolchain};

    fn check(kind: CheckKind, name: &str) -> Check {
        Check {
            kind,
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn execute(check: &Check, toolchain: &ScriptedToolchain) -> CheckResult {
        Policy::for_kind(check.kind).execute(&Probe::new(check, "", toolchain))
    }

    #[test]
    fn header_found() {
        let toolchain = ScriptedToolchain::new().accept("#include <stdio.h>");
        let mut header = check(CheckKind::Header, "stdio.h");
        header.define = Some("HAVE_STDIO_H".into());

        let result = execute(&header, &toolchain);
        assert!(result.success);
        assert_eq!(result.value, Value::integer(1));
        assert_eq!(result.define_name(), "HAVE_STDIO_H");
        assert_eq!(toolchain.invocations()[0].capability, Capability::Compile);
    }

    #[test]
    fn header_missing_uses_fail_value() {
        let toolchain = ScriptedToolchain::new();
        let result = execute(&check(CheckKind::Header, "nope.h"), &toolchain);
        assert!(!result.success);
        assert_eq!(result.value, Value::integer(0));
    }

    #[test]
    fn function_links_declare_and_call_program() {
        let toolchain = ScriptedToolchain::accepting_all();
        let result = execute(&check(CheckKind::Function, "ac_cv_func_malloc"), &toolchain);
        assert!(result.success);

        let invocation = &toolchain.invocations()[0];
        assert_eq!(invocation.capability, Capability::Link);
        assert!(invocation.source.contains("return malloc ();"));
    }

    #[test]
    fn lib_passes_library() {
        let toolchain = ScriptedToolchain::accepting_all().with_library("m");
        let mut lib = check(CheckKind::Lib, "ac_cv_lib_m_cos");
        lib.library = Some("m".into());

        let result = execute(&lib, &toolchain);
        assert!(result.success);
        let invocation = &toolchain.invocations()[0];
        assert_eq!(invocation.library.as_deref(), Some("m"));
        assert!(invocation.source.contains("return cos ();"));
    }

    #[test]
    fn define_needs_no_toolchain() {
        let toolchain = ScriptedToolchain::new();
        let result = execute(&check(CheckKind::Define, "_GNU_SOURCE"), &toolchain);
        assert!(result.success);
        assert_eq!(result.value, Value::Empty);
        assert!(toolchain.invocations().is_empty());
    }

    #[test]
    fn size_search_takes_first_candidate() {
        let toolchain = ScriptedToolchain::new().accept("[4]").accept("[8]");
        let mut sizeof = check(CheckKind::Sizeof, "SIZEOF_INT");
        sizeof.code = Some("char probe[{value}];".into());

        let result = execute(&sizeof, &toolchain);
        assert!(result.success);
        assert_eq!(result.value, Value::integer(4));
        assert_eq!(toolchain.invocations().len(), 3);
    }

    #[test]
    fn size_search_exhausted() {
        let toolchain = ScriptedToolchain::new();
        let mut sizeof = check(CheckKind::Alignof, "ALIGNOF_DOUBLE");
        sizeof.code = Some("{value}".into());

        let result = execute(&sizeof, &toolchain);
        assert!(!result.success);
        assert_eq!(result.value, Value::integer(0));
        assert_eq!(toolchain.invocations().len(), programs::SIZE_CANDIDATES.len());
    }

    #[test]
    fn run_reports_exit_status() {
        let toolchain = ScriptedToolchain::new().exit_code("endian", 1);
        let mut endian = check(CheckKind::Endian, "WORDS_BIGENDIAN");
        endian.code = Some("/* endian */".into());

        let result = execute(&endian, &toolchain);
        assert!(result.success);
        assert_eq!(result.value, Value::integer(1));
    }

    #[test]
    fn run_failure_is_zero() {
        let toolchain = ScriptedToolchain::new();
        let mut compute = check(CheckKind::ComputeInt, "VALUE");
        compute.code = Some("int main(void) { return 3; }".into());

        let result = execute(&compute, &toolchain);
        assert!(!result.success);
        assert_eq!(result.value, Value::integer(0));
    }

    #[test]
    fn decl_missing_emits_fail_value() {
        let toolchain = ScriptedToolchain::new();
        let mut decl = check(CheckKind::Decl, "HAVE_DECL_STRLCPY");
        decl.code = Some("(void) strlcpy;".into());
        decl.define_value = Some(Value::integer(1));
        decl.define_value_fail = Some(Value::integer(0));

        let result = execute(&decl, &toolchain);
        assert!(!result.success);
        assert_eq!(result.value, Value::integer(0));
        assert!(result.should_emit_define());
    }

    #[test]
    fn decl_missing_without_fail_value_is_absent() {
        let toolchain = ScriptedToolchain::new();
        let mut decl = check(CheckKind::Decl, "HAVE_DECL_X");
        decl.code = Some("x;".into());

        assert_eq!(execute(&decl, &toolchain).value, Value::Absent);
    }

    #[test]
    fn compile_with_only_fail_value_defines_on_failure() {
        let mut compile = check(CheckKind::Compile, "NEED_SHIM");
        compile.code = Some("int main(void) { return 0; }".into());
        compile.define_value_fail = Some(Value::integer(1));

        let passed = execute(&compile, &ScriptedToolchain::accepting_all());
        assert!(passed.success);
        assert_eq!(passed.value, Value::Absent);

        let failed = execute(&compile, &ScriptedToolchain::new());
        assert!(!failed.success);
        assert_eq!(failed.value, Value::integer(1));
    }

    #[test]
    fn link_reads_file_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("probe.c");
        fs::write(&path, "int main(void) { /* from file */ return 0; }").unwrap();

        let mut link = check(CheckKind::Link, "HAVE_LINK");
        link.file_path = Some(path);

        let toolchain = ScriptedToolchain::new().accept("from file");
        let result = execute(&link, &toolchain);
        assert!(result.success);
        assert_eq!(toolchain.invocations()[0].capability, Capability::Link);
    }

    #[test]
    fn unreadable_file_path_fails() {
        let mut link = check(CheckKind::Link, "HAVE_LINK");
        link.file_path = Some("/nonexistent/probe.c".into());

        let toolchain = ScriptedToolchain::accepting_all();
        let result = execute(&link, &toolchain);
        assert!(!result.success);
        assert!(toolchain.invocations().is_empty());
    }

    #[test]
    fn preamble_is_prepended() {
        let toolchain = ScriptedToolchain::accepting_all();
        let header = check(CheckKind::Header, "stdio.h");
        Policy::for_kind(header.kind).execute(&Probe::new(&header, "#define _GNU_SOURCE\n", &toolchain));

        assert!(toolchain.sources()[0].starts_with("#define _GNU_SOURCE\n#include <stdio.h>"));
    }
}
