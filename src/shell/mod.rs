//! External command execution.

pub mod command;
pub mod platform;

pub use command::{display_command, CommandResult, CommandRunner, SystemRunner};
pub use platform::{is_elevated, with_sudo};
