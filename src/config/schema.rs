//! Configuration schema definitions for docify-ci.
//!
//! This module contains the struct definitions that map to the YAML
//! override file. Every section defaults to the tables the CI has always
//! used, so an empty file (or no file) behaves exactly like the defaults.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::detection::{OsPackageManager, Platform};
use crate::metadata::VersionSpecifier;

/// Root configuration structure for `.docify-ci/config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CiConfig {
    /// Global settings
    pub settings: Settings,

    /// Per-package override tables
    pub packages: PackageOverrides,

    /// Extra and ignored OS packages per package manager
    pub os_dependencies: OsDependencyOverrides,
}

/// Tool versions and repository layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Interpreter versions to run docify on, in order
    pub python_versions: Vec<String>,

    /// Pinned docify version installed in every venv
    pub docify_version: String,

    /// typing-extensions version installed for the stdlib pass
    pub typing_extensions_version: String,

    /// Directory holding one sub-directory per stub package
    pub stubs_dir: String,

    /// Directory holding the stdlib stubs
    pub stdlib_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            python_versions: ["3.13", "3.12", "3.11", "3.10", "3.9"]
                .into_iter()
                .map(String::from)
                .collect(),
            docify_version: "1.1.0".to_string(),
            typing_extensions_version: "4.12.2".to_string(),
            stubs_dir: "stubs".to_string(),
            stdlib_dir: "stdlib".to_string(),
        }
    }
}

/// Name-keyed override tables applied on top of METADATA.toml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageOverrides {
    /// Packages never installed or documented
    pub ignored: BTreeSet<String>,

    /// Replacement platform lists
    pub platforms: BTreeMap<String, Vec<Platform>>,

    /// Replacement interpreter constraints
    pub python_versions: BTreeMap<String, VersionSpecifier>,

    /// Extras appended to the declared ones
    pub extra_extras: BTreeMap<String, Vec<String>>,

    /// Replacements for the declared extra requirements
    pub dependency_overrides: BTreeMap<String, Vec<String>>,

    /// Requirements always installed next to the package
    pub extra_dependencies: BTreeMap<String, Vec<String>>,
}

fn table<V: Clone>(entries: &[(&str, V)]) -> BTreeMap<String, V> {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn spec(s: &str) -> VersionSpecifier {
    VersionSpecifier::parse(s).expect("built-in specifier is valid")
}

impl Default for PackageOverrides {
    fn default() -> Self {
        use Platform::{Darwin, Linux, Win32};

        Self {
            ignored: [
                "Jetson.GPIO", // can't import
                "RPi.GPIO",    // only builds on a Pi
                "gdb",         // internal to gdb
                "pyserial",    // no __main__ guard
                "uWSGI",       // sdist doesn't build
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            platforms: table(&[
                ("JACK-Client", vec![Linux, Darwin]),
                ("atheris", vec![Linux]),
                ("capturer", vec![Linux, Darwin]),
                ("dateparser", vec![Linux, Darwin]),
                ("ibm-db", vec![Linux]),
                ("psycopg2", vec![Linux, Darwin]),
                ("pycurl", vec![Linux, Darwin]),
                ("pywin32", vec![Win32]),
                ("wurlitzer", vec![Linux, Darwin]),
            ]),
            python_versions: table(&[
                ("atheris", spec("<=3.10")),
                ("cffi", spec("<=3.12")),
                ("corus", spec("<=3.12")),
                ("humanfriendly", spec("<=3.12")),
                ("ibm-db", spec("<=3.12")),
                ("networkx", spec(">=3.10")),
                ("opentracing", spec("<=3.11")),
                ("pygit2", spec("<=3.12")),
                ("tensorflow", spec("<=3.12")),
                ("tree-sitter-languages", spec("<=3.12")),
                ("tqdm", spec("<=3.12")),
            ]),
            extra_extras: table(&[
                ("dateparser", strings(&["calendars"])),
                ("docker", strings(&["ssh"])),
                ("python-jose", strings(&["cryptography", "pycryptodome"])),
                ("workalendar", strings(&["astronomy"])),
            ]),
            // tensorflow's stubtest requirements start background services
            dependency_overrides: table(&[("tensorflow", Vec::new())]),
            extra_dependencies: table(&[
                ("docutils", strings(&["recommonmark"])),
                ("openpyxl", strings(&["numpy"])),
                (
                    "opentracing",
                    strings(&["mock", "pytest-mock", "gevent", "tornado==5.1.*"]),
                ),
                ("python-gflags", strings(&["six"])),
            ]),
        }
    }
}

/// Extra and ignored OS packages for one package manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerOverrides {
    /// Always installed
    pub extra: Vec<String>,

    /// Never installed, even when a package asks for it
    pub ignore: Vec<String>,
}

/// OS dependency adjustments, one entry per package manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsDependencyOverrides {
    pub apt: ManagerOverrides,
    pub brew: ManagerOverrides,
    pub choco: ManagerOverrides,
}

impl OsDependencyOverrides {
    /// Overrides for the given package manager.
    pub fn for_manager(&self, manager: OsPackageManager) -> &ManagerOverrides {
        match manager {
            OsPackageManager::Apt => &self.apt,
            OsPackageManager::Brew => &self.brew,
            OsPackageManager::Choco => &self.choco,
        }
    }
}

impl Default for OsDependencyOverrides {
    fn default() -> Self {
        Self {
            apt: ManagerOverrides {
                extra: strings(&["libgit2-1.7", "libcurl4-openssl-dev"]),
                ignore: Vec::new(),
            },
            brew: ManagerOverrides {
                extra: strings(&["jack", "libgit2", "mariadb", "postgresql@16", "openssl"]),
                // preinstalled on the runners
                ignore: strings(&["libuv", "openssl"]),
            },
            choco: ManagerOverrides {
                extra: strings(&["mitkerberos"]),
                ignore: Vec::new(),
            },
        }
    }
}
