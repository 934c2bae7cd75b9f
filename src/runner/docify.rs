//! Running docify for one interpreter version.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::catalog::StubCatalog;
use crate::config::CiConfig;
use crate::detection::Platform;
use crate::error::{DocifyError, Result};
use crate::overrides::{resolve_package, Resolution, ResolveContext};
use crate::shell::{display_command, CommandRunner};
use crate::ui::UserInterface;

use super::report::{PackageStatus, RunReport};
use super::venv::{Venv, VenvGuard};

/// Name used in reports for the stdlib pass.
pub const STDLIB: &str = "stdlib";

/// Installs stub dependencies and runs docify, one interpreter at a time.
pub struct DocifyRunner<'a> {
    project_root: PathBuf,
    config: &'a CiConfig,
    commands: &'a dyn CommandRunner,
    platform: Platform,
}

impl<'a> DocifyRunner<'a> {
    /// Create a runner for the current platform.
    pub fn new(project_root: &Path, config: &'a CiConfig, commands: &'a dyn CommandRunner) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            commands,
            platform: Platform::current(),
        }
    }

    /// Resolve packages as if running on `platform`.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Document the stdlib and every package in `catalog` with `python`.
    ///
    /// Package failures, including a package's venv failing to build, are
    /// logged and recorded in the report. Only the stdlib pass's venv ends
    /// the run early with an error. The venv directory is removed on every
    /// path out of this function.
    pub fn run(
        &self,
        python: &str,
        catalog: &StubCatalog,
        ui: &mut dyn UserInterface,
    ) -> Result<RunReport> {
        ui.show_header(&format!("Running on Python {}:", python));

        let venv = Venv::for_python(&self.project_root, python);
        let _guard = VenvGuard::new(&venv);
        let mut report = RunReport::new(python);

        let stdlib = self.docify_stdlib(&venv, python, ui)?;
        report.record(STDLIB, stdlib);

        let ctx = ResolveContext::new(self.platform, python);
        for dir in catalog.package_dirs() {
            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let status = self.docify_package(&venv, &ctx, &name, dir, ui);
            report.record(&name, status);
        }

        ui.message("");
        Ok(report)
    }

    fn docify_stdlib(
        &self,
        venv: &Venv,
        python: &str,
        ui: &mut dyn UserInterface,
    ) -> Result<PackageStatus> {
        ui.message(&format!("  {}:", STDLIB));
        self.init_venv(venv, python, ui)?;
        ui.message("    initialised venv");

        // typing-extensions has stubs in stdlib/ but ships on PyPI
        let req = format!(
            "typing-extensions=={}",
            self.config.settings.typing_extensions_version
        );
        if let Err(e) = self.pip_install(venv, &[req.clone()], ui) {
            warn!("{}: install failed: {}", STDLIB, e);
            return Ok(PackageStatus::Failed(e.to_string()));
        }
        ui.message(&format!("    installed {}", req));

        let stdlib_dir = self.project_root.join(&self.config.settings.stdlib_dir);
        if let Err(e) = self.docify(venv, &stdlib_dir, ui) {
            warn!("{}: docify failed: {}", STDLIB, e);
            return Ok(PackageStatus::Failed(e.to_string()));
        }
        ui.success("    done");
        Ok(PackageStatus::Done)
    }

    fn docify_package(
        &self,
        venv: &Venv,
        ctx: &ResolveContext,
        name: &str,
        dir: &Path,
        ui: &mut dyn UserInterface,
    ) -> PackageStatus {
        ui.message(&format!("  {}:", name));

        let package = match resolve_package(dir, ctx, &self.config.packages) {
            Resolution::Proceed(package) => package,
            Resolution::Skip(reason) => {
                info!("{}: {}", name, reason);
                ui.skipped(&format!("    {}", reason));
                return PackageStatus::Skipped(reason);
            }
            Resolution::Fail(e) => {
                warn!("{}: {}", name, e);
                return PackageStatus::Failed(e.to_string());
            }
        };

        if let Err(e) = self.init_venv(venv, &ctx.python_version, ui) {
            warn!("{}: {}", name, e);
            return PackageStatus::Failed(e.to_string());
        }
        ui.message("    initialised venv");

        let reqs = package.install_requirements();
        if let Err(e) = self.pip_install(venv, &reqs, ui) {
            warn!("{}: install failed: {}", name, e);
            return PackageStatus::Failed(e.to_string());
        }
        ui.message(&format!("    installed {}", reqs.join(" ")));

        if let Err(e) = self.docify(venv, dir, ui) {
            warn!("{}: docify failed: {}", name, e);
            return PackageStatus::Failed(e.to_string());
        }
        ui.success("    done");
        PackageStatus::Done
    }

    /// Create (or recreate) the venv and install docify into it.
    fn init_venv(&self, venv: &Venv, python: &str, ui: &mut dyn UserInterface) -> Result<()> {
        let setup_error = |e: DocifyError| DocifyError::EnvironmentSetup {
            python: python.to_string(),
            message: e.to_string(),
        };

        let create = vec![
            "uv".to_string(),
            "venv".to_string(),
            "-q".to_string(),
            "--no-project".to_string(),
            "--python-preference".to_string(),
            "only-managed".to_string(),
            "-p".to_string(),
            format!("python{}", python),
            venv.path().display().to_string(),
        ];
        self.checked(&create, ui).map_err(setup_error)?;

        let docify = format!("docify=={}", self.config.settings.docify_version);
        self.pip_install(venv, &[docify], ui).map_err(setup_error)
    }

    fn pip_install(
        &self,
        venv: &Venv,
        reqs: &[String],
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let mut argv = vec![
            "uv".to_string(),
            "pip".to_string(),
            "install".to_string(),
            "-q".to_string(),
            "-p".to_string(),
            venv.python().display().to_string(),
        ];
        argv.extend(reqs.iter().cloned());
        self.checked(&argv, ui)
    }

    fn docify(&self, venv: &Venv, input_dir: &Path, ui: &mut dyn UserInterface) -> Result<()> {
        let argv = vec![
            venv.executable("docify").display().to_string(),
            "-qi".to_string(),
            input_dir.display().to_string(),
        ];
        self.checked(&argv, ui)
    }

    fn checked(&self, argv: &[String], ui: &mut dyn UserInterface) -> Result<()> {
        ui.show_command(&display_command(argv));
        self.commands.run_checked(argv).map(|_| ())
    }
}
