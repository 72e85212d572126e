//! Compiler flag filtering.
//!
//! Probes must tolerate warnings, so flags that escalate warnings into
//! errors are removed before any test program is built.

/// Whether `flag` turns warnings into errors.
pub fn is_error_flag(flag: &str) -> bool {
    flag == "-Werror"
        || flag == "/WX"
        || flag.starts_with("-Werror=")
        // breaks function probes that redeclare builtins
        || flag == "-Wincompatible-library-redeclaration"
}

/// Remove warning-escalating flags.
pub fn filter_error_flags(flags: &[String]) -> Vec<String> {
    flags
        .iter()
        .filter(|flag| !is_error_flag(flag))
        .cloned()
        .collect()
}
