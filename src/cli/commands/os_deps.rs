//! Install-os-deps command implementation.
//!
//! The `docify-ci install-os-deps` command installs the native packages
//! that stub packages need to build, using apt, brew or choco.

use std::path::{Path, PathBuf};

use crate::catalog::StubCatalog;
use crate::cli::args::OsDepsArgs;
use crate::detection::{OsPackageManager, Platform};
use crate::error::{DocifyError, Result};
use crate::shell::{display_command, with_sudo, CommandRunner, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{load_config_or_report, Command, CommandResult, EXIT_NOT_FOUND};

/// The install-os-deps command implementation.
pub struct OsDepsCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: OsDepsArgs,
    commands: Box<dyn CommandRunner>,
}

impl OsDepsCommand {
    /// Create a new install-os-deps command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: OsDepsArgs) -> Self {
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

    /// The package manager to install with.
    pub fn manager(&self) -> OsPackageManager {
        self.args
            .manager
            .unwrap_or_else(|| OsPackageManager::for_platform(Platform::current()))
    }

    fn run_install(&self, manager: OsPackageManager, argv: &[String]) -> Result<()> {
        let result = self.commands.run(argv)?;
        match result.exit_code {
            _ if result.success => Ok(()),
            Some(code) if manager.tolerates_exit_code(code) => {
                tracing::info!("{} exited with {}, treating as success", manager, code);
                Ok(())
            }
            code => Err(DocifyError::CommandFailed {
                command: display_command(argv),
                code,
            }),
        }
    }
}

impl Command for OsDepsCommand {
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

        let manager = self.manager();
        let packages: Vec<String> = catalog
            .collect_os_dependencies(manager, &config.os_dependencies)
            .into_iter()
            .collect();

        if packages.is_empty() {
            tracing::info!("No {} packages to install", manager);
            return Ok(CommandResult::success());
        }

        for argv in manager.install_commands(&packages) {
            let argv = with_sudo(argv, self.args.sudo);
            ui.output(&display_command(&argv));
            if self.args.dry_run {
                continue;
            }
            if let Err(e) = self.run_install(manager, &argv) {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
        }

        Ok(CommandResult::success())
    }
}
