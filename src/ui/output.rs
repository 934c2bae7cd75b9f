//! Output verbosity.

use std::str::FromStr;

/// How much the console reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Progress lines plus every external command before it runs.
    Verbose,
    /// Per-package progress lines.
    #[default]
    Normal,
    /// Headers, warnings and summaries only.
    Quiet,
    /// Errors only.
    Silent,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            "silent" => Ok(Self::Silent),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl OutputMode {
    /// Whether external commands are echoed.
    pub fn shows_commands(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Whether per-package progress lines are shown.
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Whether headers, warnings and summaries are shown.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}
