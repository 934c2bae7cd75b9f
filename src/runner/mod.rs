//! docify execution across interpreter versions.
//!
//! - [`venv`] - venv layout and the cleanup guard
//! - [`docify`] - the per-interpreter run
//! - [`report`] - per-package outcomes

pub mod docify;
pub mod report;
pub mod venv;

pub use docify::{DocifyRunner, STDLIB};
pub use report::{PackageReport, PackageStatus, RunReport};
pub use venv::{Venv, VenvGuard};
