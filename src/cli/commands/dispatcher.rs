//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, CiConfig};
use crate::error::{DocifyError, Result};
use crate::ui::UserInterface;

/// Exit code for a missing stubs directory or config file.
pub const EXIT_NOT_FOUND: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Load the override config, reporting a missing explicit file.
///
/// Returns `Ok(None)` after printing the error when `--config` names a file
/// that does not exist; callers exit with [`EXIT_NOT_FOUND`].
pub(crate) fn load_config_or_report(
    project_root: &Path,
    config_path: Option<&Path>,
    ui: &mut dyn UserInterface,
) -> Result<Option<CiConfig>> {
    match load_config(project_root, config_path) {
        Ok(config) => Ok(Some(config)),
        Err(e @ DocifyError::ConfigNotFound { .. }) => {
            ui.error(&e.to_string());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given repository root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            config_path: None,
        }
    }

    /// Use an explicit override file instead of discovering one.
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Get the repository root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the explicit override file, if any.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let root = &self.project_root;
        let config = self.config_path();

        match &cli.command {
            Commands::Run(args) => {
                let cmd = super::run::RunCommand::new(root, config, args.clone());
                cmd.execute(ui)
            }
            Commands::InstallOsDeps(args) => {
                let cmd = super::os_deps::OsDepsCommand::new(root, config, args.clone());
                cmd.execute(ui)
            }
            Commands::Requirements(args) => {
                let cmd =
                    super::requirements::RequirementsCommand::new(root, config, args.clone());
                cmd.execute(ui)
            }
            Commands::Config(args) => {
                let cmd = super::config::ConfigCommand::new(root, config, args.clone());
                cmd.execute(ui)
            }
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}
