//! Config command implementation.
//!
//! The `docify-ci config` command shows the resolved override configuration.

use std::path::{Path, PathBuf};

use crate::cli::args::ConfigArgs;
use crate::config::find_project_config;
use crate::error::{DocifyError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{load_config_or_report, Command, CommandResult, EXIT_NOT_FOUND};

/// The config command implementation.
pub struct ConfigCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: ConfigArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// The file the configuration comes from, if any.
    fn source(&self) -> Option<PathBuf> {
        self.config_path
            .clone()
            .or_else(|| find_project_config(&self.project_root))
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) =
            load_config_or_report(&self.project_root, self.config_path.as_deref(), ui)?
        else {
            return Ok(CommandResult::failure(EXIT_NOT_FOUND));
        };

        if self.args.json {
            let json =
                serde_json::to_string_pretty(&config).map_err(|e| DocifyError::Other(e.into()))?;
            ui.output(&json);
        } else {
            match self.source() {
                Some(path) => ui.output(&format!("# {}", path.display())),
                None => ui.output("# built-in defaults"),
            }
            let yaml = serde_yaml::to_string(&config).map_err(|e| DocifyError::Other(e.into()))?;
            ui.output(&yaml);
        }

        Ok(CommandResult::success())
    }
}
