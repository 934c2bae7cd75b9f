//! METADATA.toml loading.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::detection::{OsPackageManager, Platform};
use crate::error::{DocifyError, Result};

use super::specifier::VersionSpecifier;

/// File name of the per-package declaration file.
pub const METADATA_FILE: &str = "METADATA.toml";

/// Everything docify-ci needs to know about one stub package.
#[derive(Debug, Clone, PartialEq)]
pub struct StubMetadata {
    /// Package name (the stub directory name).
    pub name: String,

    /// Version constraint of the runtime distribution.
    pub version: VersionSpecifier,

    /// Extras requested alongside the distribution.
    pub extras: Vec<String>,

    /// Platforms the package may be installed on.
    pub platforms: BTreeSet<Platform>,

    /// Interpreter constraint, `None` accepts every version.
    pub requires_python: Option<VersionSpecifier>,

    /// Additional requirements installed next to the distribution.
    pub extra_requirements: Vec<String>,

    pub apt_dependencies: Vec<String>,
    pub brew_dependencies: Vec<String>,
    pub choco_dependencies: Vec<String>,
}

impl StubMetadata {
    /// Create metadata with every optional field at its default.
    pub fn new(name: impl Into<String>, version: VersionSpecifier) -> Self {
        Self {
            name: name.into(),
            version,
            extras: Vec::new(),
            platforms: BTreeSet::from([Platform::default()]),
            requires_python: None,
            extra_requirements: Vec::new(),
            apt_dependencies: Vec::new(),
            brew_dependencies: Vec::new(),
            choco_dependencies: Vec::new(),
        }
    }

    /// OS packages this stub needs from the given package manager.
    pub fn os_dependencies(&self, manager: OsPackageManager) -> &[String] {
        match manager {
            OsPackageManager::Apt => &self.apt_dependencies,
            OsPackageManager::Brew => &self.brew_dependencies,
            OsPackageManager::Choco => &self.choco_dependencies,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    version: String,
    #[serde(default)]
    requires_python: Option<String>,
    #[serde(default)]
    tool: RawTools,
}

#[derive(Debug, Default, Deserialize)]
struct RawTools {
    #[serde(default)]
    stubtest: RawStubtest,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStubtest {
    extras: Vec<String>,
    ci_platforms: Option<Vec<String>>,
    stubtest_requirements: Vec<String>,
    apt_dependencies: Vec<String>,
    brew_dependencies: Vec<String>,
    choco_dependencies: Vec<String>,
}

/// Load the metadata of the stub package in `dir`.
///
/// # Errors
///
/// Returns `MetadataNotFound` if the directory has no METADATA.toml.
/// Returns `MetadataParseError` if the file is not valid TOML, lacks a
/// `version`, or carries an invalid specifier or platform.
pub fn load_metadata(dir: &Path) -> Result<StubMetadata> {
    let path = dir.join(METADATA_FILE);
    let content = fs::read_to_string(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DocifyError::MetadataNotFound { path: path.clone() }
        } else {
            DocifyError::Io(e)
        }
    })?;

    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    parse_metadata(&name, &content, &path)
}

/// Parse METADATA.toml content for the package `name`.
///
/// # Arguments
///
/// * `name` - Package name, normally the stub directory name
/// * `content` - The TOML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_metadata(name: &str, content: &str, source_path: &Path) -> Result<StubMetadata> {
    let parse_error = |message: String| DocifyError::MetadataParseError {
        path: source_path.to_path_buf(),
        message,
    };

    let raw: RawMetadata = toml::from_str(content).map_err(|e| parse_error(e.to_string()))?;

    if raw.version.trim().is_empty() {
        return Err(parse_error("`version` must not be empty".to_string()));
    }
    let version =
        VersionSpecifier::from_declared(&raw.version).map_err(|e| parse_error(e.to_string()))?;

    let requires_python = raw
        .requires_python
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(VersionSpecifier::parse)
        .transpose()
        .map_err(|e| parse_error(e.to_string()))?;

    let stubtest = raw.tool.stubtest;

    let mut metadata = StubMetadata::new(name, version);
    metadata.requires_python = requires_python;
    metadata.extras = stubtest.extras;
    metadata.extra_requirements = stubtest.stubtest_requirements;
    metadata.apt_dependencies = stubtest.apt_dependencies;
    metadata.brew_dependencies = stubtest.brew_dependencies;
    metadata.choco_dependencies = stubtest.choco_dependencies;

    if let Some(platforms) = stubtest.ci_platforms {
        metadata.platforms = platforms
            .iter()
            .map(|p| p.parse::<Platform>())
            .collect::<std::result::Result<_, _>>()
            .map_err(parse_error)?;
    }

    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_stub(temp: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let dir = temp.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(METADATA_FILE), content).unwrap();
        dir
    }

    #[test]
    fn minimal_metadata_gets_defaults() {
        let temp = TempDir::new().unwrap();
        let dir = write_stub(&temp, "six", "version = \"1.16.*\"\n");

        let meta = load_metadata(&dir).unwrap();

        assert_eq!(meta.name, "six");
        assert_eq!(meta.version.to_string(), "==1.16.*");
        assert!(meta.extras.is_empty());
        assert_eq!(meta.platforms, BTreeSet::from([Platform::Linux]));
        assert!(meta.requires_python.is_none());
        assert!(meta.extra_requirements.is_empty());
        assert!(meta.apt_dependencies.is_empty());
        assert!(meta.brew_dependencies.is_empty());
        assert!(meta.choco_dependencies.is_empty());
    }

    #[test]
    fn full_metadata() {
        let temp = TempDir::new().unwrap();
        let dir = write_stub(
            &temp,
            "requests",
            r#"
version = "~=2.31"
requires_python = ">=3.9"
upstream_repository = "https://github.com/psf/requests"

[tool.stubtest]
extras = ["socks"]
ci_platforms = ["Linux", "darwin", "win32"]
stubtest_requirements = ["urllib3"]
apt_dependencies = ["libssl-dev"]
brew_dependencies = ["openssl"]
choco_dependencies = ["openssl"]
"#,
        );

        let meta = load_metadata(&dir).unwrap();

        assert_eq!(meta.version.to_string(), "~=2.31");
        assert_eq!(meta.requires_python.as_ref().unwrap().to_string(), ">=3.9");
        assert_eq!(meta.extras, vec!["socks"]);
        assert_eq!(
            meta.platforms,
            BTreeSet::from([Platform::Linux, Platform::Darwin, Platform::Win32])
        );
        assert_eq!(meta.extra_requirements, vec!["urllib3"]);
        assert_eq!(meta.os_dependencies(OsPackageManager::Apt), ["libssl-dev"]);
        assert_eq!(meta.os_dependencies(OsPackageManager::Brew), ["openssl"]);
        assert_eq!(meta.os_dependencies(OsPackageManager::Choco), ["openssl"]);
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("empty");
        fs::create_dir_all(&dir).unwrap();

        let err = load_metadata(&dir).unwrap_err();

        assert!(matches!(err, DocifyError::MetadataNotFound { .. }));
    }

    #[test]
    fn missing_version_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let dir = write_stub(&temp, "broken", "requires_python = \">=3.9\"\n");

        let err = load_metadata(&dir).unwrap_err();

        assert!(matches!(err, DocifyError::MetadataParseError { .. }));
    }

    #[test]
    fn empty_version_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let dir = write_stub(&temp, "broken", "version = \"\"\n");

        assert!(matches!(
            load_metadata(&dir).unwrap_err(),
            DocifyError::MetadataParseError { .. }
        ));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let dir = write_stub(&temp, "broken", "version = [unterminated\n");

        assert!(matches!(
            load_metadata(&dir).unwrap_err(),
            DocifyError::MetadataParseError { .. }
        ));
    }

    #[test]
    fn invalid_requires_python_is_parse_error() {
        let err = parse_metadata(
            "pkg",
            "version = \"1.0\"\nrequires_python = \"python3\"\n",
            Path::new("METADATA.toml"),
        )
        .unwrap_err();

        assert!(matches!(err, DocifyError::MetadataParseError { .. }));
    }

    #[test]
    fn unknown_platform_is_parse_error() {
        let err = parse_metadata(
            "pkg",
            "version = \"1.0\"\n[tool.stubtest]\nci_platforms = [\"solaris\"]\n",
            Path::new("METADATA.toml"),
        )
        .unwrap_err();

        assert!(err.to_string().contains("solaris"));
    }

    #[test]
    fn operator_version_is_used_verbatim() {
        let meta = parse_metadata("pkg", "version = \">=0.5\"\n", Path::new("METADATA.toml"))
            .unwrap();
        assert_eq!(meta.version.to_string(), ">=0.5");
    }
}
