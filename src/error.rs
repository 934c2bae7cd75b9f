//! Error types for docify-ci operations.
//!
//! This module defines [`DocifyError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Metadata errors are fatal for one package only; the driver catches them
//!   at the per-package boundary and moves on
//! - Skips are not errors at all, see [`crate::overrides::SkipReason`]
//! - Use `anyhow::Error` (via `DocifyError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for docify-ci operations.
#[derive(Debug, Error)]
pub enum DocifyError {
    /// A stub package has no METADATA.toml.
    #[error("Metadata not found: {path}")]
    MetadataNotFound { path: PathBuf },

    /// METADATA.toml could not be parsed or is missing required fields.
    #[error("Failed to parse metadata at {path}: {message}")]
    MetadataParseError { path: PathBuf, message: String },

    /// A version constraint could not be parsed.
    #[error("Invalid version specifier '{spec}': {message}")]
    InvalidSpecifier { spec: String, message: String },

    /// Override configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the override configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The stubs directory does not exist.
    #[error("Stubs directory not found: {path}")]
    StubsDirNotFound { path: PathBuf },

    /// External command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// The working environment for an interpreter run could not be built.
    #[error("Failed to set up environment for Python {python}: {message}")]
    EnvironmentSetup { python: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for docify-ci operations.
pub type Result<T> = std::result::Result<T, DocifyError>;
