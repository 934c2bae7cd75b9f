//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use docify_ci::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("  six:");
//! ui.skipped("    ignoring");
//!
//! assert!(ui.has_message("six"));
//! assert!(ui.skips().contains(&"    ignoring".to_string()));
//! ```

use super::{OutputMode, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    outputs: Vec<String>,
    messages: Vec<String>,
    successes: Vec<String>,
    skips: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    commands: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn skips(&self) -> &[String] {
        &self.skips
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Commands echoed through `show_command`.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Check if a message containing `msg` was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if an error containing `msg` was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a warning containing `msg` was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn output(&mut self, text: &str) {
        self.outputs.push(text.to_string());
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn skipped(&mut self, msg: &str) {
        self.skips.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_command(&mut self, command: &str) {
        self.commands.push(command.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_each_channel_separately() {
        let mut ui = MockUI::new();
        ui.output("docify==1.1.0");
        ui.message("  six:");
        ui.success("    done");
        ui.skipped("    ignoring");
        ui.warning("careful");
        ui.error("broken");
        ui.show_header("Running on Python 3.12:");
        ui.show_command("uv venv");

        assert_eq!(ui.outputs(), ["docify==1.1.0"]);
        assert_eq!(ui.messages(), ["  six:"]);
        assert_eq!(ui.successes(), ["    done"]);
        assert_eq!(ui.skips(), ["    ignoring"]);
        assert!(ui.has_warning("careful"));
        assert!(ui.has_error("broken"));
        assert_eq!(ui.headers(), ["Running on Python 3.12:"]);
        assert_eq!(ui.commands(), ["uv venv"]);
    }

    #[test]
    fn with_mode_sets_mode() {
        let ui = MockUI::with_mode(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }
}
