//! Stub package enumeration and aggregation.
//!
//! [`StubCatalog`] lists the package directories under the stubs directory
//! in name order, so every listing it produces is reproducible across
//! platforms. Packages with unreadable metadata are logged and left out of
//! aggregated outputs instead of aborting them.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{OsDependencyOverrides, Settings};
use crate::detection::OsPackageManager;
use crate::error::{DocifyError, Result};
use crate::metadata::{load_metadata, StubMetadata};

/// The stub packages of a repository.
#[derive(Debug, Clone)]
pub struct StubCatalog {
    dirs: Vec<PathBuf>,
}

impl StubCatalog {
    /// List the package directories in `stubs_dir`, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `StubsDirNotFound` if `stubs_dir` is not a directory.
    pub fn discover(stubs_dir: &Path) -> Result<Self> {
        if !stubs_dir.is_dir() {
            return Err(DocifyError::StubsDirNotFound {
                path: stubs_dir.to_path_buf(),
            });
        }

        let mut dirs = Vec::new();
        for entry in fs::read_dir(stubs_dir)? {
            let path = entry?.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        tracing::debug!(
            "Found {} stub packages in {}",
            dirs.len(),
            stubs_dir.display()
        );
        Ok(Self { dirs })
    }

    /// Package directories in catalog order.
    pub fn package_dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Load every package, logging and dropping the ones that fail.
    pub fn load_all(&self) -> Vec<StubMetadata> {
        self.dirs
            .iter()
            .filter_map(|dir| match load_metadata(dir) {
                Ok(meta) => Some(meta),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", dir.display(), e);
                    None
                }
            })
            .collect()
    }

    /// OS packages to install with `manager`.
    ///
    /// The union of every package's dependencies plus the configured extras,
    /// minus the configured ignores.
    pub fn collect_os_dependencies(
        &self,
        manager: OsPackageManager,
        overrides: &OsDependencyOverrides,
    ) -> BTreeSet<String> {
        let mut packages: BTreeSet<String> = self
            .load_all()
            .iter()
            .flat_map(|meta| meta.os_dependencies(manager).iter().cloned())
            .collect();

        let adjust = overrides.for_manager(manager);
        packages.extend(adjust.extra.iter().cloned());
        for ignored in &adjust.ignore {
            packages.remove(ignored);
        }

        packages
    }

    /// A standalone requirements listing.
    ///
    /// docify and typing-extensions come first, each followed by a blank
    /// line, then one requirement per package from its declared metadata.
    pub fn requirements_listing(&self, settings: &Settings, include_markers: bool) -> Vec<String> {
        let mut lines = vec![
            format!("docify=={}", settings.docify_version),
            String::new(),
            format!("typing-extensions=={}", settings.typing_extensions_version),
            String::new(),
        ];
        lines.extend(
            self.load_all()
                .iter()
                .map(|meta| meta.make_requirement(include_markers)),
        );
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ManagerOverrides;
    use crate::metadata::METADATA_FILE;
    use tempfile::TempDir;

    fn write_stub(root: &Path, name: &str, content: &str) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(METADATA_FILE), content).unwrap();
    }

    fn no_os_overrides() -> OsDependencyOverrides {
        OsDependencyOverrides {
            apt: ManagerOverrides::default(),
            brew: ManagerOverrides::default(),
            choco: ManagerOverrides::default(),
        }
    }

    #[test]
    fn missing_stubs_dir() {
        let temp = TempDir::new().unwrap();
        let err = StubCatalog::discover(&temp.path().join("stubs")).unwrap_err();
        assert!(matches!(err, DocifyError::StubsDirNotFound { .. }));
    }

    #[test]
    fn discovers_sorted_directories_only() {
        let temp = TempDir::new().unwrap();
        write_stub(temp.path(), "zope", "version = \"1.0\"\n");
        write_stub(temp.path(), "attrs", "version = \"1.0\"\n");
        write_stub(temp.path(), "Markdown", "version = \"1.0\"\n");
        fs::write(temp.path().join("README.md"), "not a package").unwrap();

        let catalog = StubCatalog::discover(temp.path()).unwrap();

        let names: Vec<_> = catalog
            .package_dirs()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Markdown", "attrs", "zope"]);
    }

    #[test]
    fn os_dependencies_are_deduplicated_union() {
        let temp = TempDir::new().unwrap();
        write_stub(
            temp.path(),
            "a",
            "version = \"1.0\"\n[tool.stubtest]\napt_dependencies = [\"libx\", \"liby\"]\n",
        );
        write_stub(
            temp.path(),
            "b",
            "version = \"1.0\"\n[tool.stubtest]\napt_dependencies = [\"liby\"]\nbrew_dependencies = [\"z\"]\n",
        );

        let catalog = StubCatalog::discover(temp.path()).unwrap();
        let deps = catalog.collect_os_dependencies(OsPackageManager::Apt, &no_os_overrides());

        assert_eq!(
            deps,
            BTreeSet::from(["libx".to_string(), "liby".to_string()])
        );
    }

    #[test]
    fn os_dependency_extras_and_ignores() {
        let temp = TempDir::new().unwrap();
        write_stub(
            temp.path(),
            "a",
            "version = \"1.0\"\n[tool.stubtest]\nbrew_dependencies = [\"libuv\", \"cairo\"]\n",
        );
        let mut overrides = no_os_overrides();
        overrides.brew = ManagerOverrides {
            extra: vec!["openssl".to_string(), "jack".to_string()],
            ignore: vec!["libuv".to_string(), "openssl".to_string()],
        };

        let catalog = StubCatalog::discover(temp.path()).unwrap();
        let deps = catalog.collect_os_dependencies(OsPackageManager::Brew, &overrides);

        assert_eq!(
            deps,
            BTreeSet::from(["cairo".to_string(), "jack".to_string()])
        );
    }

    #[test]
    fn broken_package_does_not_abort_aggregation() {
        let temp = TempDir::new().unwrap();
        write_stub(temp.path(), "broken", "not = [valid\n");
        write_stub(
            temp.path(),
            "ok",
            "version = \"1.0\"\n[tool.stubtest]\nchoco_dependencies = [\"mit\"]\n",
        );

        let catalog = StubCatalog::discover(temp.path()).unwrap();
        let deps = catalog.collect_os_dependencies(OsPackageManager::Choco, &no_os_overrides());

        assert_eq!(deps, BTreeSet::from(["mit".to_string()]));
    }

    #[test]
    fn requirements_listing_layout() {
        let temp = TempDir::new().unwrap();
        write_stub(
            temp.path(),
            "requests",
            "version = \"2.31.*\"\nrequires_python = \">=3.9\"\n[tool.stubtest]\nextras = [\"socks\"]\n",
        );
        write_stub(temp.path(), "six", "version = \"1.16.*\"\n");

        let catalog = StubCatalog::discover(temp.path()).unwrap();
        let listing = catalog
            .requirements_listing(&Settings::default(), true)
            .join("\n");

        insta::assert_snapshot!(listing, @r"
        docify==1.1.0

        typing-extensions==4.12.2

        requests[socks]==2.31.*; python_version>='3.9'
        six==1.16.*
        ");
    }

    #[test]
    fn requirements_listing_without_markers() {
        let temp = TempDir::new().unwrap();
        write_stub(
            temp.path(),
            "requests",
            "version = \"2.31.*\"\nrequires_python = \">=3.9\"\n",
        );

        let catalog = StubCatalog::discover(temp.path()).unwrap();
        let listing = catalog.requirements_listing(&Settings::default(), false);

        assert_eq!(listing.last().unwrap(), "requests==2.31.*");
    }
}
