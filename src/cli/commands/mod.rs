//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands that start processes
//! accept a replacement [`crate::shell::CommandRunner`] so tests never
//! touch uv or a package manager.

pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod os_deps;
pub mod requirements;
pub mod run;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, EXIT_NOT_FOUND};
