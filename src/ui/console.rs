//! Line-oriented console UI.

use super::theme::{should_use_colors, DocifyTheme};
use super::{OutputMode, UserInterface};

/// UI that writes plain status lines, suitable for CI logs.
///
/// Progress and status go to stdout; warnings and errors go to stderr.
pub struct ConsoleUI {
    mode: OutputMode,
    theme: DocifyTheme,
}

impl ConsoleUI {
    /// Create a console UI, coloring output only on a terminal.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            DocifyTheme::new()
        } else {
            DocifyTheme::plain()
        };
        Self { mode, theme }
    }

    /// Create a console UI with an explicit theme.
    pub fn with_theme(mode: OutputMode, theme: DocifyTheme) -> Self {
        Self { mode, theme }
    }
}

impl UserInterface for ConsoleUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn output(&mut self, text: &str) {
        println!("{}", text);
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn skipped(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            println!("{}", self.theme.format_skipped(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_header(title));
        }
    }

    fn show_command(&mut self, command: &str) {
        if self.mode.shows_commands() {
            println!("{}", self.theme.format_skipped(command));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_output_mode_changes_mode() {
        let mut ui = ConsoleUI::with_theme(OutputMode::Normal, DocifyTheme::plain());
        ui.set_output_mode(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn silent_mode_accepts_all_calls() {
        let mut ui = ConsoleUI::with_theme(OutputMode::Silent, DocifyTheme::plain());
        ui.show_header("Running on Python 3.12:");
        ui.message("  six:");
        ui.skipped("    ignoring");
        ui.success("    done");
        ui.warning("careful");
        ui.show_command("uv venv");
    }
}
