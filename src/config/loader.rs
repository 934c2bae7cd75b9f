//! Configuration file discovery and loading.

use crate::config::schema::CiConfig;
use crate::error::{DocifyError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project configuration, relative to the root.
pub const CONFIG_DIR: &str = ".docify-ci";

/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yml";

/// Find the project config at `.docify-ci/config.yml`.
pub fn find_project_config(project_root: &Path) -> Option<PathBuf> {
    let path = project_root.join(CONFIG_DIR).join(CONFIG_FILE);
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<CiConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DocifyError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DocifyError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`CiConfig`].
///
/// Blank files are treated as empty mappings.
pub fn parse_config(content: &str, source_path: &Path) -> Result<CiConfig> {
    if content.trim().is_empty() {
        return Ok(CiConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| DocifyError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the configuration for a project.
///
/// An explicit path must exist. Without one, `.docify-ci/config.yml` is used
/// when present and the built-in defaults otherwise.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<CiConfig> {
    match explicit {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(path)
        }
        None => match find_project_config(project_root) {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                load_config_file(&path)
            }
            None => {
                tracing::debug!("No config file, using built-in defaults");
                Ok(CiConfig::default())
            }
        },
    }
}
