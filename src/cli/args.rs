//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::detection::OsPackageManager;

/// docify-ci - Document type stubs with docify across Python versions.
#[derive(Debug, Parser)]
#[command(name = "docify-ci")]
#[command(
    author,
    version,
    about = "Document type stubs with docify across Python versions",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to repository root (overrides current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Path to override file (overrides default .docify-ci/config.yml)
    #[arg(short, long, global = true, env = "DOCIFY_CI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show verbose output, including every external command
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install stubs and run docify for each Python version
    Run(RunArgs),

    /// Install the OS packages the stubs need to build
    InstallOsDeps(OsDepsArgs),

    /// Print a requirements listing for every stub package
    Requirements(RequirementsArgs),

    /// Show resolved override configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Python version to run on (repeatable; defaults to the configured list)
    #[arg(short, long = "python", value_name = "VERSION")]
    pub python: Vec<String>,
}

/// Arguments for the `install-os-deps` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct OsDepsArgs {
    /// Package manager to use (defaults to the current platform's)
    #[arg(value_enum)]
    pub manager: Option<OsPackageManager>,

    /// Run commands through sudo unless already elevated
    #[arg(long)]
    pub sudo: bool,

    /// Print commands without executing
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `requirements` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RequirementsArgs {
    /// Leave out `python_version` environment markers
    #[arg(long)]
    pub no_markers: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
