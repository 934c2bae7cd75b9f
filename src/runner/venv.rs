//! Per-interpreter virtual environments.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Layout of a `uv`-created virtual environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Venv {
    path: PathBuf,
}

impl Venv {
    /// The working venv for `python` under `project_root` (`.venv_py3.12`).
    pub fn for_python(project_root: &Path, python: &str) -> Self {
        Self {
            path: project_root.join(format!(".venv_py{}", python)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of an executable installed in the venv.
    pub fn executable(&self, name: &str) -> PathBuf {
        if cfg!(target_os = "windows") {
            self.path.join("Scripts").join(format!("{}.exe", name))
        } else {
            self.path.join("bin").join(name)
        }
    }

    /// The venv's interpreter.
    pub fn python(&self) -> PathBuf {
        self.executable("python")
    }
}

/// Removes a venv directory when dropped.
///
/// Acquired before the first venv is created for an interpreter run, so the
/// directory is gone after the run whichever way it ends. Removal failures
/// are logged; they never replace an error already on its way out.
#[derive(Debug)]
pub struct VenvGuard {
    path: PathBuf,
}

impl VenvGuard {
    pub fn new(venv: &Venv) -> Self {
        Self {
            path: venv.path().to_path_buf(),
        }
    }

    /// Remove the directory if it exists.
    pub fn cleanup(&self) -> io::Result<()> {
        if self.path.exists() {
            tracing::debug!("Removing {}", self.path.display());
            fs::remove_dir_all(&self.path)?;
        }
        Ok(())
    }
}

impl Drop for VenvGuard {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            tracing::warn!("Failed to remove {}: {}", self.path.display(), e);
        }
    }
}
