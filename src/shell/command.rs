//! External command execution.
//!
//! Commands are always given as an argument vector and run without a
//! shell. Output is inherited so package manager and docify progress
//! shows up directly in CI logs.

use crate::error::{DocifyError, Result};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: Option<i32>, duration: Duration) -> Self {
        Self {
            exit_code,
            duration,
            success: false,
        }
    }
}

/// Render an argument vector for logs and error messages.
pub fn display_command(argv: &[String]) -> String {
    argv.join(" ")
}

/// Runs external programs.
///
/// The driver and the OS dependency installer only talk to the outside
/// world through this trait, so tests can substitute a recording runner.
pub trait CommandRunner {
    /// Run `argv[0]` with the remaining arguments.
    ///
    /// A command that starts but exits non-zero is `Ok` with
    /// `success == false`; only a failure to start is an `Err`.
    fn run(&self, argv: &[String]) -> Result<CommandResult>;

    /// Run a command and turn a non-zero exit into `CommandFailed`.
    fn run_checked(&self, argv: &[String]) -> Result<CommandResult> {
        let result = self.run(argv)?;
        if result.success {
            Ok(result)
        } else {
            Err(DocifyError::CommandFailed {
                command: display_command(argv),
                code: result.exit_code,
            })
        }
    }
}

/// [`CommandRunner`] that spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[String]) -> Result<CommandResult> {
        let (program, args) = argv.split_first().ok_or_else(|| DocifyError::CommandFailed {
            command: String::new(),
            code: None,
        })?;

        let start = Instant::now();
        tracing::debug!("Running: {}", display_command(argv));

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| {
                tracing::debug!("Failed to start {}: {}", program, e);
                DocifyError::CommandFailed {
                    command: display_command(argv),
                    code: None,
                }
            })?;

        let duration = start.elapsed();

        if status.success() {
            Ok(CommandResult::success(duration))
        } else {
            Ok(CommandResult::failure(status.code(), duration))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn display_joins_with_spaces() {
        assert_eq!(
            display_command(&argv(&["uv", "pip", "install", "six==1.16.*"])),
            "uv pip install six==1.16.*"
        );
    }

    #[test]
    fn empty_argv_is_an_error() {
        assert!(SystemRunner.run(&[]).is_err());
    }

    #[test]
    fn missing_program_is_an_error() {
        let err = SystemRunner
            .run(&argv(&["docify-ci-definitely-not-a-real-program"]))
            .unwrap_err();
        assert!(matches!(err, DocifyError::CommandFailed { code: None, .. }));
    }

    #[cfg(unix)]
    #[test]
    fn successful_command() {
        let result = SystemRunner.run(&argv(&["true"])).unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_is_ok_but_unsuccessful() {
        let result = SystemRunner.run(&argv(&["false"])).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn run_checked_reports_exit_code() {
        let err = SystemRunner.run_checked(&argv(&["false"])).unwrap_err();
        match err {
            DocifyError::CommandFailed { command, code } => {
                assert_eq!(command, "false");
                assert_eq!(code, Some(1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
