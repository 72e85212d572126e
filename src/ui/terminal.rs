//! Terminal UI.

use super::theme::{should_use_colors, ProbeTheme};
use super::{OutputMode, UserInterface};

/// Writes status to stdout and diagnostics to stderr.
pub struct TerminalUI {
    mode: OutputMode,
    theme: ProbeTheme,
}

impl TerminalUI {
    /// Create a terminal UI, styling output when stderr is a TTY.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            ProbeTheme::new()
        } else {
            ProbeTheme::plain()
        };
        Self { mode, theme }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn check_status(&mut self, subject: &str, found: bool) {
        if self.mode.shows_check_status() {
            println!("{}", self.theme.format_check_status(subject, found));
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_output_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }
}
