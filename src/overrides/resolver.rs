//! Applying override tables to loaded metadata.

use std::fmt;
use std::path::Path;

use crate::config::PackageOverrides;
use crate::detection::Platform;
use crate::error::DocifyError;
use crate::metadata::{load_metadata, StubMetadata, VersionSpecifier};

/// Where the resolution happens: the current platform and interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveContext {
    pub platform: Platform,
    pub python_version: String,
}

impl ResolveContext {
    pub fn new(platform: Platform, python_version: impl Into<String>) -> Self {
        Self {
            platform,
            python_version: python_version.into(),
        }
    }
}

/// Why a package is intentionally left out of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Listed in the static ignore table.
    Ignored,
    /// Not available on the current platform.
    UnsupportedPlatform { platform: Platform },
    /// The interpreter does not satisfy the package's constraint.
    UnsupportedPython { requires: VersionSpecifier },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignored => write!(f, "ignoring"),
            Self::UnsupportedPlatform { platform } => {
                write!(f, "ignoring - unavailable on {}", platform)
            }
            Self::UnsupportedPython { requires } => {
                write!(f, "ignoring - requires python_version{}", requires)
            }
        }
    }
}

/// A package that passed every check, with overrides applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPackage {
    /// Metadata after overrides.
    pub metadata: StubMetadata,

    /// Requirements always installed for this package name.
    pub extra_dependencies: Vec<String>,
}

impl ResolvedPackage {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Everything to pass to the installer, main requirement first.
    ///
    /// The interpreter already matches, so no marker is rendered.
    pub fn install_requirements(&self) -> Vec<String> {
        std::iter::once(self.metadata.make_requirement(false))
            .chain(self.metadata.extra_requirements.iter().cloned())
            .chain(self.extra_dependencies.iter().cloned())
            .collect()
    }
}

/// Outcome of resolving one package.
#[derive(Debug)]
pub enum Resolution {
    /// Install and document the package.
    Proceed(ResolvedPackage),
    /// Leave the package out of this run. Not an error.
    Skip(SkipReason),
    /// The package could not be loaded.
    Fail(DocifyError),
}

/// Apply `overrides` to `metadata` for the given context.
///
/// Steps run in a fixed order: ignore list, platform, interpreter version,
/// extras, dependency replacement, extra dependencies. The first three may
/// end resolution with a skip.
pub fn resolve(
    mut metadata: StubMetadata,
    ctx: &ResolveContext,
    overrides: &PackageOverrides,
) -> Resolution {
    let name = metadata.name.clone();

    if overrides.ignored.contains(&name) {
        return Resolution::Skip(SkipReason::Ignored);
    }

    if let Some(platforms) = overrides.platforms.get(&name) {
        metadata.platforms = platforms.iter().copied().collect();
    }
    if !metadata.platforms.contains(&ctx.platform) {
        return Resolution::Skip(SkipReason::UnsupportedPlatform {
            platform: ctx.platform,
        });
    }

    if let Some(requires) = overrides.python_versions.get(&name) {
        metadata.requires_python = Some(requires.clone());
    }
    if let Some(requires) = &metadata.requires_python {
        if !requires.contains(&ctx.python_version) {
            return Resolution::Skip(SkipReason::UnsupportedPython {
                requires: requires.clone(),
            });
        }
    }

    if let Some(extras) = overrides.extra_extras.get(&name) {
        metadata.extras.extend(extras.iter().cloned());
    }

    if let Some(deps) = overrides.dependency_overrides.get(&name) {
        metadata.extra_requirements = deps.clone();
    }

    let extra_dependencies = overrides
        .extra_dependencies
        .get(&name)
        .cloned()
        .unwrap_or_default();

    Resolution::Proceed(ResolvedPackage {
        metadata,
        extra_dependencies,
    })
}

/// Load the package in `dir` and resolve it.
///
/// Loading errors become [`Resolution::Fail`].
pub fn resolve_package(
    dir: &Path,
    ctx: &ResolveContext,
    overrides: &PackageOverrides,
) -> Resolution {
    match load_metadata(dir) {
        Ok(metadata) => resolve(metadata, ctx, overrides),
        Err(e) => Resolution::Fail(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    fn empty_overrides() -> PackageOverrides {
        PackageOverrides {
            ignored: BTreeSet::new(),
            platforms: BTreeMap::new(),
            python_versions: BTreeMap::new(),
            extra_extras: BTreeMap::new(),
            dependency_overrides: BTreeMap::new(),
            extra_dependencies: BTreeMap::new(),
        }
    }

    fn meta(name: &str) -> StubMetadata {
        StubMetadata::new(name, VersionSpecifier::parse("==1.0").unwrap())
    }

    fn linux(py: &str) -> ResolveContext {
        ResolveContext::new(Platform::Linux, py)
    }

    fn proceed(resolution: Resolution) -> ResolvedPackage {
        match resolution {
            Resolution::Proceed(p) => p,
            other => panic!("expected Proceed, got {:?}", other),
        }
    }

    fn skip(resolution: Resolution) -> SkipReason {
        match resolution {
            Resolution::Skip(r) => r,
            other => panic!("expected Skip, got {:?}", other),
        }
    }

    #[test]
    fn no_overrides_proceeds_unchanged() {
        let resolved = proceed(resolve(meta("six"), &linux("3.12"), &empty_overrides()));
        assert_eq!(resolved.metadata, meta("six"));
        assert_eq!(resolved.install_requirements(), vec!["six==1.0"]);
    }

    #[test]
    fn ignored_package_is_skipped() {
        let mut overrides = empty_overrides();
        overrides.ignored.insert("gdb".to_string());

        assert_eq!(
            skip(resolve(meta("gdb"), &linux("3.12"), &overrides)),
            SkipReason::Ignored
        );
    }

    #[test]
    fn ignore_wins_over_everything_else() {
        let mut overrides = empty_overrides();
        overrides.ignored.insert("gdb".to_string());
        overrides
            .platforms
            .insert("gdb".to_string(), vec![Platform::Win32]);

        assert_eq!(
            skip(resolve(meta("gdb"), &linux("3.12"), &overrides)),
            SkipReason::Ignored
        );
    }

    #[test]
    fn default_platform_is_linux_only() {
        let ctx = ResolveContext::new(Platform::Darwin, "3.12");
        assert_eq!(
            skip(resolve(meta("six"), &ctx, &empty_overrides())),
            SkipReason::UnsupportedPlatform {
                platform: Platform::Darwin
            }
        );
    }

    #[test]
    fn platform_override_replaces_declared() {
        let mut overrides = empty_overrides();
        overrides
            .platforms
            .insert("pywin32".to_string(), vec![Platform::Win32]);

        assert!(matches!(
            skip(resolve(meta("pywin32"), &linux("3.12"), &overrides)),
            SkipReason::UnsupportedPlatform { .. }
        ));

        let ctx = ResolveContext::new(Platform::Win32, "3.12");
        let resolved = proceed(resolve(meta("pywin32"), &ctx, &overrides));
        assert_eq!(resolved.metadata.platforms, BTreeSet::from([Platform::Win32]));
    }

    #[test]
    fn declared_requires_python_is_checked() {
        let mut m = meta("pkg");
        m.requires_python = Some(VersionSpecifier::parse(">=3.10").unwrap());

        let reason = skip(resolve(m.clone(), &linux("3.9"), &empty_overrides()));
        assert_eq!(reason.to_string(), "ignoring - requires python_version>=3.10");

        proceed(resolve(m, &linux("3.10"), &empty_overrides()));
    }

    #[test]
    fn python_override_replaces_declared() {
        let mut m = meta("tensorflow");
        m.requires_python = Some(VersionSpecifier::parse(">=3.9").unwrap());
        let mut overrides = empty_overrides();
        overrides.python_versions.insert(
            "tensorflow".to_string(),
            VersionSpecifier::parse("<=3.12").unwrap(),
        );

        assert!(matches!(
            skip(resolve(m.clone(), &linux("3.13"), &overrides)),
            SkipReason::UnsupportedPython { .. }
        ));

        let resolved = proceed(resolve(m, &linux("3.12"), &overrides));
        assert_eq!(
            resolved.metadata.requires_python.unwrap().to_string(),
            "<=3.12"
        );
    }

    #[test]
    fn extras_are_appended() {
        let mut m = meta("docker");
        m.extras = vec!["a".to_string()];
        let mut overrides = empty_overrides();
        overrides
            .extra_extras
            .insert("docker".to_string(), vec!["b".to_string()]);

        let resolved = proceed(resolve(m, &linux("3.12"), &overrides));

        assert_eq!(resolved.metadata.extras, vec!["a", "b"]);
    }

    #[test]
    fn dependency_override_replaces() {
        let mut m = meta("tensorflow");
        m.extra_requirements = vec!["x".to_string()];
        let mut overrides = empty_overrides();
        overrides
            .dependency_overrides
            .insert("tensorflow".to_string(), vec!["y".to_string()]);

        let resolved = proceed(resolve(m, &linux("3.12"), &overrides));

        assert_eq!(resolved.metadata.extra_requirements, vec!["y"]);
    }

    #[test]
    fn empty_dependency_override_clears() {
        let mut m = meta("tensorflow");
        m.extra_requirements = vec!["x".to_string()];
        let mut overrides = empty_overrides();
        overrides
            .dependency_overrides
            .insert("tensorflow".to_string(), Vec::new());

        let resolved = proceed(resolve(m, &linux("3.12"), &overrides));

        assert_eq!(resolved.install_requirements(), vec!["tensorflow==1.0"]);
    }

    #[test]
    fn extra_dependencies_apply_with_and_without_override() {
        let mut m = meta("opentracing");
        m.extra_requirements = vec!["x".to_string()];
        let mut overrides = empty_overrides();
        overrides
            .extra_dependencies
            .insert("opentracing".to_string(), vec!["mock".to_string()]);

        let resolved = proceed(resolve(m.clone(), &linux("3.11"), &overrides));
        assert_eq!(
            resolved.install_requirements(),
            vec!["opentracing==1.0", "x", "mock"]
        );

        overrides
            .dependency_overrides
            .insert("opentracing".to_string(), vec!["y".to_string()]);
        let resolved = proceed(resolve(m, &linux("3.11"), &overrides));
        assert_eq!(
            resolved.install_requirements(),
            vec!["opentracing==1.0", "y", "mock"]
        );
    }

    #[test]
    fn extras_and_dependency_overrides_are_independent() {
        let mut m = meta("pkg");
        m.extras = vec!["a".to_string()];
        m.extra_requirements = vec!["x".to_string()];

        let mut only_extras = empty_overrides();
        only_extras
            .extra_extras
            .insert("pkg".to_string(), vec!["b".to_string()]);
        let mut only_deps = empty_overrides();
        only_deps
            .dependency_overrides
            .insert("pkg".to_string(), vec!["y".to_string()]);

        // extras first, then dependencies
        let step = proceed(resolve(m.clone(), &linux("3.12"), &only_extras));
        let a = proceed(resolve(step.metadata, &linux("3.12"), &only_deps));
        // dependencies first, then extras
        let step = proceed(resolve(m, &linux("3.12"), &only_deps));
        let b = proceed(resolve(step.metadata, &linux("3.12"), &only_extras));

        assert_eq!(a.metadata.extras, b.metadata.extras);
        assert_eq!(a.metadata.extra_requirements, b.metadata.extra_requirements);
        assert_eq!(a.metadata.extras, vec!["a", "b"]);
        assert_eq!(a.metadata.extra_requirements, vec!["y"]);
    }

    #[test]
    fn install_requirements_have_no_marker() {
        let mut m = meta("pkg");
        m.requires_python = Some(VersionSpecifier::parse(">=3.9").unwrap());

        let resolved = proceed(resolve(m, &linux("3.12"), &empty_overrides()));

        assert_eq!(resolved.install_requirements(), vec!["pkg==1.0"]);
    }

    #[test]
    fn skip_reason_messages() {
        assert_eq!(SkipReason::Ignored.to_string(), "ignoring");
        assert_eq!(
            SkipReason::UnsupportedPlatform {
                platform: Platform::Win32
            }
            .to_string(),
            "ignoring - unavailable on win32"
        );
    }

    #[test]
    fn resolve_package_fails_on_missing_metadata() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("pkg");
        std::fs::create_dir_all(&dir).unwrap();

        let resolution = resolve_package(&dir, &linux("3.12"), &empty_overrides());

        assert!(matches!(
            resolution,
            Resolution::Fail(DocifyError::MetadataNotFound { .. })
        ));
    }

    #[test]
    fn resolve_package_loads_then_skips() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("gdb");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("METADATA.toml"), "version = \"12.1\"\n").unwrap();
        let mut overrides = empty_overrides();
        overrides.ignored.insert("gdb".to_string());

        let resolution = resolve_package(&dir, &linux("3.12"), &overrides);

        assert!(matches!(resolution, Resolution::Skip(SkipReason::Ignored)));
    }
}
