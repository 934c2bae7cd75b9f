//! Per-package outcomes of an interpreter run.

use std::fmt;

use crate::overrides::SkipReason;

/// What happened to one package during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum PackageStatus {
    /// Installed and documented.
    Done,
    /// Intentionally left out.
    Skipped(SkipReason),
    /// Loading, installing or documenting failed.
    Failed(String),
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done => write!(f, "done"),
            Self::Skipped(reason) => write!(f, "skipped ({})", reason),
            Self::Failed(message) => write!(f, "failed ({})", message),
        }
    }
}

/// One package's entry in a [`RunReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct PackageReport {
    pub name: String,
    pub status: PackageStatus,
}

/// Outcomes of one interpreter run, in processing order.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub python: String,
    pub packages: Vec<PackageReport>,
}

impl RunReport {
    pub fn new(python: &str) -> Self {
        Self {
            python: python.to_string(),
            packages: Vec::new(),
        }
    }

    pub fn record(&mut self, name: &str, status: PackageStatus) {
        self.packages.push(PackageReport {
            name: name.to_string(),
            status,
        });
    }

    /// Status of the named package, if it was processed.
    pub fn status(&self, name: &str) -> Option<&PackageStatus> {
        self.packages
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.status)
    }

    pub fn done(&self) -> usize {
        self.count(|s| matches!(s, PackageStatus::Done))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, PackageStatus::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, PackageStatus::Failed(_)))
    }

    /// Names of the packages that failed.
    pub fn failures(&self) -> Vec<&str> {
        self.packages
            .iter()
            .filter(|p| matches!(p.status, PackageStatus::Failed(_)))
            .map(|p| p.name.as_str())
            .collect()
    }

    /// One-line summary, e.g. `Python 3.12: 40 done, 3 skipped, 1 failed`.
    pub fn summary(&self) -> String {
        format!(
            "Python {}: {} done, {} skipped, {} failed",
            self.python,
            self.done(),
            self.skipped(),
            self.failed()
        )
    }

    fn count(&self, pred: impl Fn(&PackageStatus) -> bool) -> usize {
        self.packages.iter().filter(|p| pred(&p.status)).count()
    }
}
