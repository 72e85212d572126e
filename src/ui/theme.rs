//! Visual theme and styling.

use console::Style;

/// Terminal styles for status output.
#[derive(Debug, Clone)]
pub struct ProbeTheme {
    /// Style for positive results and success messages (green).
    pub success: Style,
    /// Style for negative results (dim).
    pub dim: Style,
    /// Style for fatal errors (red bold).
    pub error: Style,
}

impl Default for ProbeTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            dim: Style::new().dim(),
            error: Style::new().red().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            dim: Style::new(),
            error: Style::new(),
        }
    }

    /// Format a "checking X... yes|no" line with the answer styled.
    pub fn format_check_status(&self, subject: &str, found: bool) -> String {
        let answer = if found {
            self.success.apply_to("yes")
        } else {
            self.dim.apply_to("no")
        };
        format!("checking {}... {}", subject, answer)
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stderr().is_term()
}
