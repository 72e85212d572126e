//! Output verbosity.

/// Output verbosity mode, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show per-check "checking X... yes" lines.
    Verbose,
    /// Show the final status line.
    #[default]
    Normal,
    /// Show errors only.
    Quiet,
}

impl OutputMode {
    /// Resolve the mode from the global CLI flags.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows "checking X..." lines.
    pub fn shows_check_status(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_mode_from_flags() {
        assert_eq!(OutputMode::from_flags(false, false), OutputMode::Normal);
        assert_eq!(OutputMode::from_flags(true, false), OutputMode::Verbose);
        assert_eq!(OutputMode::from_flags(true, true), OutputMode::Quiet);
    }

    #[test]
    fn only_verbose_shows_check_status() {
        assert!(OutputMode::Verbose.shows_check_status());
        assert!(!OutputMode::Normal.shows_check_status());
        assert!(!OutputMode::Quiet.shows_check_status());
    }

    #[test]
    fn output_mode_shows_status() {
        assert!(OutputMode::Verbose.shows_status());
        assert!(OutputMode::Normal.shows_status());
        assert!(!OutputMode::Quiet.shows_status());
    }

    #[test]
    fn output_mode_default() {
        assert_eq!(OutputMode::default(), OutputMode::Normal);
    }
}
