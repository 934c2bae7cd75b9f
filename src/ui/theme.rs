//! Visual theme and styling.

use console::Style;

/// Console styles for status lines.
#[derive(Debug, Clone)]
pub struct DocifyTheme {
    /// Style for finished packages (green).
    pub success: Style,
    /// Style for warnings (orange).
    pub warning: Style,
    /// Style for errors (red bold).
    pub error: Style,
    /// Style for skipped packages and secondary text (dim).
    pub dim: Style,
    /// Style for run headers (bold magenta).
    pub header: Style,
}

impl Default for DocifyTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl DocifyTheme {
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            header: Style::new().bold().magenta(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            header: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(msg))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(msg))
    }

    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_leaves_text_alone() {
        let theme = DocifyTheme::plain();
        assert_eq!(theme.format_success("    done"), "    done");
        assert_eq!(theme.format_skipped("    ignoring"), "    ignoring");
        assert_eq!(theme.format_header("Running on Python 3.12:"), "Running on Python 3.12:");
    }

    #[test]
    fn warnings_and_errors_carry_icons() {
        let theme = DocifyTheme::plain();
        assert_eq!(theme.format_warning("careful"), "⚠ careful");
        assert_eq!(theme.format_error("broken"), "✗ broken");
    }
}
