//! Requirements command implementation.
//!
//! The `docify-ci requirements` command prints a requirements listing for
//! docify, typing-extensions and every stub package.

use std::path::{Path, PathBuf};

use crate::catalog::StubCatalog;
use crate::cli::args::RequirementsArgs;
use crate::error::{DocifyError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{load_config_or_report, Command, CommandResult, EXIT_NOT_FOUND};

/// The requirements command implementation.
pub struct RequirementsCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: RequirementsArgs,
}

impl RequirementsCommand {
    /// Create a new requirements command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: RequirementsArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for RequirementsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) =
            load_config_or_report(&self.project_root, self.config_path.as_deref(), ui)?
        else {
            return Ok(CommandResult::failure(EXIT_NOT_FOUND));
        };

        let stubs_dir = self.project_root.join(&config.settings.stubs_dir);
        let catalog = match StubCatalog::discover(&stubs_dir) {
            Ok(catalog) => catalog,
            Err(e @ DocifyError::StubsDirNotFound { .. }) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_NOT_FOUND));
            }
            Err(e) => return Err(e),
        };

        for line in catalog.requirements_listing(&config.settings, !self.args.no_markers) {
            ui.output(&line);
        }

        Ok(CommandResult::success())
    }
}
