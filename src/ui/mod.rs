//! Console user interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`ConsoleUI`] for terminals and CI logs
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use docify_ci::ui::{ConsoleUI, OutputMode, UserInterface};
//!
//! let mut ui = ConsoleUI::new(OutputMode::Quiet);
//! ui.show_header("Running on Python 3.12:");
//! ui.message("  six:");
//! ```

pub mod console;
pub mod mock;
pub mod output;
pub mod theme;

pub use console::ConsoleUI;
pub use mock::MockUI;
pub use output::OutputMode;
pub use theme::{should_use_colors, DocifyTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Write command output (listings, config dumps) regardless of mode.
    fn output(&mut self, text: &str);

    /// Display a progress line.
    fn message(&mut self, msg: &str);

    /// Display a finished-successfully line.
    fn success(&mut self, msg: &str);

    /// Display an intentionally-skipped line.
    fn skipped(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Echo an external command about to run.
    fn show_command(&mut self, command: &str);
}
