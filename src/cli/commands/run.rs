//! Run command implementation.
//!
//! The `docify-ci run` command documents the stdlib and every stub package
//! once per Python version.

use std::path::{Path, PathBuf};

use crate::catalog::StubCatalog;
use crate::cli::args::RunArgs;
use crate::error::{DocifyError, Result};
use crate::runner::DocifyRunner;
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{load_config_or_report, Command, CommandResult, EXIT_NOT_FOUND};

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: RunArgs,
    commands: Box<dyn CommandRunner>,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
            commands: Box::new(SystemRunner),
        }
    }

    /// Replace the process runner.
    pub fn with_command_runner(mut self, commands: Box<dyn CommandRunner>) -> Self {
        self.commands = commands;
        self
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }
}

impl Command for RunCommand {
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

        let versions = if self.args.python.is_empty() {
            &config.settings.python_versions
        } else {
            &self.args.python
        };

        let runner = DocifyRunner::new(&self.project_root, &config, self.commands.as_ref());
        let mut aborted = Vec::new();

        for python in versions {
            match runner.run(python, &catalog, ui) {
                Ok(report) => {
                    tracing::info!("{}", report.summary());
                    if report.failed() > 0 {
                        ui.warning(&format!(
                            "Python {}: failed packages: {}",
                            python,
                            report.failures().join(", ")
                        ));
                    }
                }
                Err(e) => {
                    ui.error(&e.to_string());
                    aborted.push(python.as_str());
                }
            }
        }

        if aborted.is_empty() {
            Ok(CommandResult::success())
        } else {
            ui.error(&format!("Aborted runs: Python {}", aborted.join(", ")));
            Ok(CommandResult::failure(1))
        }
    }
}
