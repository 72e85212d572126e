//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use probeconf::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.check_status("HAVE_STDIO_H", true);
//! ui.error("compiler not found");
//!
//! assert_eq!(ui.status_lines(), vec!["checking HAVE_STDIO_H... yes".to_string()]);
//! assert!(ui.errors().contains(&"compiler not found".to_string()));
//! ```

use super::theme::ProbeTheme;
use super::{OutputMode, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    statuses: Vec<(String, bool)>,
    successes: Vec<String>,
    errors: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI in Verbose mode.
    pub fn new() -> Self {
        Self::with_mode(OutputMode::Verbose)
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Get all captured check statuses as `(subject, found)`.
    pub fn statuses(&self) -> &[(String, bool)] {
        &self.statuses
    }

    /// Captured check statuses rendered as plain "checking X... yes" lines.
    pub fn status_lines(&self) -> Vec<String> {
        let theme = ProbeTheme::plain();
        self.statuses
            .iter()
            .map(|(subject, found)| theme.format_check_status(subject, *found))
            .collect()
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured errors.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn check_status(&mut self, subject: &str, found: bool) {
        self.statuses.push((subject.to_string(), found));
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }
}
