//! User-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait, passed into the runner and generator
//! - [`TerminalUI`] for real terminals
//! - [`MockUI`] for tests
//! - [`OutputMode`] verbosity, resolved once at startup
//!
//! # Example
//!
//! ```
//! use probeconf::ui::{MockUI, OutputMode, UserInterface};
//!
//! let mut ui = MockUI::with_mode(OutputMode::Verbose);
//! ui.check_status("HAVE_STDLIB_H", true);
//! assert_eq!(ui.statuses().len(), 1);
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, ProbeTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Report the outcome of one check ("checking X... yes").
    fn check_status(&mut self, subject: &str, found: bool);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);
}
