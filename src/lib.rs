//! docify-ci - Run docify over a type-stub repository in CI.
//!
//! docify-ci reads each stub package's `METADATA.toml`, applies the CI's
//! override tables, installs the package into a throwaway venv with `uv`,
//! and runs docify on the stubs, once per Python version.
//!
//! # Modules
//!
//! - [`catalog`] - Stub package enumeration and aggregated listings
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Override file loading and built-in defaults
//! - [`detection`] - Platforms and OS package managers
//! - [`error`] - Error types and result aliases
//! - [`metadata`] - METADATA.toml parsing and requirement strings
//! - [`overrides`] - Applying override tables to package metadata
//! - [`runner`] - Per-interpreter docify runs
//! - [`shell`] - External command execution
//! - [`ui`] - Console output
//!
//! # Example
//!
//! ```
//! use docify_ci::metadata::{StubMetadata, VersionSpecifier};
//!
//! let mut meta = StubMetadata::new("requests", VersionSpecifier::parse("==2.31.*").unwrap());
//! meta.extras = vec!["socks".to_string()];
//! meta.requires_python = Some(VersionSpecifier::parse(">=3.9").unwrap());
//!
//! assert_eq!(meta.make_requirement(false), "requests[socks]==2.31.*");
//! assert_eq!(
//!     meta.make_requirement(true),
//!     "requests[socks]==2.31.*; python_version>='3.9'"
//! );
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod metadata;
pub mod overrides;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{DocifyError, Result};
