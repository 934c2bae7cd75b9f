//! Override configuration for docify-ci.
//!
//! - Schema definitions and built-in defaults in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use docify_ci::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".docify-ci");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "packages:\n  ignored: [gdb]\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert!(config.packages.ignored.contains("gdb"));
//! ```
//!
//! # Configuration File Locations
//!
//! 1. `--config <file>` when given
//! 2. Project config (`.docify-ci/config.yml`)
//! 3. Built-in defaults

pub mod loader;
pub mod schema;

pub use loader::{
    find_project_config, load_config, load_config_file, parse_config, CONFIG_DIR, CONFIG_FILE,
};
pub use schema::{CiConfig, ManagerOverrides, OsDependencyOverrides, PackageOverrides, Settings};
