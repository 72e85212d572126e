//! Error types for probeconf operations.
//!
//! This module defines [`ProbeError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Structural problems (malformed checks, unresolvable dependencies,
//!   conflicting results, unreadable inputs) are `ProbeError`s and abort
//!   the invocation
//! - Probe outcomes ("function does not link") are never errors; they are
//!   recorded as `success = false` in a [`CheckResult`](crate::checks::CheckResult)
//! - Use `anyhow::Error` (via `ProbeError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for probeconf operations.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Configuration file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a configuration or check file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A check description is structurally invalid.
    #[error("Invalid check '{check}': {message}")]
    InvalidCheck { check: String, message: String },

    /// A check declares a kind this crate does not know.
    #[error("Unknown check type: {kind}")]
    UnknownCheckKind { kind: String },

    /// A requirement or condition names a result that was never supplied.
    #[error("Check '{check}' depends on '{name}' which was not found (available: {available})")]
    UnresolvedDependency {
        check: String,
        name: String,
        available: String,
    },

    /// A `compile_defines` entry is missing from the dependency results.
    #[error("Check '{check}' requires compile define '{name}' which is not among its dependencies")]
    MissingCompileDefine { check: String, name: String },

    /// The same dependency key was mapped to two different result files.
    #[error("Dependency '{name}' is already mapped to {existing}, cannot remap to {attempted}")]
    DuplicateDependency {
        name: String,
        existing: PathBuf,
        attempted: PathBuf,
    },

    /// A result file does not follow the interchange format.
    #[error("Invalid result file {path}: {message}")]
    InvalidResultFile { path: PathBuf, message: String },

    /// Two result files disagree about the same check.
    #[error("Conflicting result values for '{name}': {first} vs {second}")]
    ConflictingResults {
        name: String,
        first: String,
        second: String,
    },

    /// A requirement or condition expression could not be parsed.
    #[error("Invalid expression '{expression}': {message}")]
    InvalidExpression { expression: String, message: String },

    /// An input file could not be read.
    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: PathBuf, message: String },

    /// An output file could not be written.
    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },

    /// A toolchain process could not be started or waited on.
    #[error("Command failed: {command}: {message}")]
    CommandFailed { command: String, message: String },

    /// Command-line arguments are malformed.
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for probeconf operations.
pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = ProbeError::ConfigNotFound {
            path: PathBuf::from("/build/toolchain.json"),
        };
        assert!(err.to_string().contains("/build/toolchain.json"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = ProbeError::ConfigParseError {
            path: PathBuf::from("/check.json"),
            message: "expected value".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/check.json"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn invalid_check_displays_check_and_message() {
        let err = ProbeError::InvalidCheck {
            check: "ac_cv_sizeof_long".into(),
            message: "'code' is required".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ac_cv_sizeof_long"));
        assert!(msg.contains("'code' is required"));
    }

    #[test]
    fn unresolved_dependency_lists_available_keys() {
        let err = ProbeError::UnresolvedDependency {
            check: "HAVE_BAR".into(),
            name: "HAVE_FOO".into(),
            available: "HAVE_BAZ, HAVE_QUX".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("HAVE_FOO"));
        assert!(msg.contains("HAVE_BAZ, HAVE_QUX"));
    }

    #[test]
    fn conflicting_results_shows_both_values() {
        let err = ProbeError::ConflictingResults {
            name: "ac_cv_header_stdio_h".into(),
            first: "success=true value=1".into(),
            second: "success=false value=0".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Conflicting result values"));
        assert!(msg.contains("success=true value=1"));
        assert!(msg.contains("success=false value=0"));
    }

    #[test]
    fn duplicate_dependency_displays_both_paths() {
        let err = ProbeError::DuplicateDependency {
            name: "HAVE_FOO".into(),
            existing: PathBuf::from("a.json"),
            attempted: PathBuf::from("b.json"),
        };
        let msg = err.to_string();
        assert!(msg.contains("a.json"));
        assert!(msg.contains("b.json"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ProbeError = io_err.into();
        assert!(matches!(err, ProbeError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts() {
        let err: ProbeError = anyhow::anyhow!("unexpected").into();
        assert!(matches!(err, ProbeError::Other(_)));
        assert_eq!(err.to_string(), "unexpected");
    }
}
