//! Platform and package manager identification.

pub mod package_manager;
pub mod platform;

pub use package_manager::OsPackageManager;
pub use platform::Platform;
