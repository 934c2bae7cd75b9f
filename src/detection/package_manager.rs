//! OS package managers.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::platform::Platform;

/// Exit code chocolatey uses for "installed, reboot required".
const CHOCO_REBOOT_REQUIRED: i32 = 3010;

/// System package manager used to install native build dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OsPackageManager {
    Apt,
    Brew,
    Choco,
}

impl OsPackageManager {
    /// The package manager conventionally available on `platform`.
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Linux => Self::Apt,
            Platform::Darwin => Self::Brew,
            Platform::Win32 => Self::Choco,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apt => "apt",
            Self::Brew => "brew",
            Self::Choco => "choco",
        }
    }

    /// Commands to run, in order, to install `packages`.
    ///
    /// Returns no commands when there is nothing to install.
    pub fn install_commands(&self, packages: &[String]) -> Vec<Vec<String>> {
        if packages.is_empty() {
            return Vec::new();
        }

        let argv = |parts: &[&str]| -> Vec<String> {
            parts
                .iter()
                .map(|s| s.to_string())
                .chain(packages.iter().cloned())
                .collect()
        };

        match self {
            Self::Apt => vec![
                vec!["apt-get".into(), "-q".into(), "update".into()],
                argv(&["apt-get", "-q", "install"]),
            ],
            Self::Brew => vec![
                vec!["brew".into(), "update".into()],
                argv(&["brew", "install"]),
            ],
            Self::Choco => vec![argv(&["choco", "install", "--no-progress"])],
        }
    }

    /// Whether a non-zero exit code still means the install succeeded.
    pub fn tolerates_exit_code(&self, code: i32) -> bool {
        matches!(self, Self::Choco) && code == CHOCO_REBOOT_REQUIRED
    }
}

impl fmt::Display for OsPackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
