//! Stub package metadata.
//!
//! - [`specifier`] - Version constraints and interpreter checks
//! - [`loader`] - METADATA.toml parsing into [`StubMetadata`]
//! - [`requirement`] - Rendering metadata as a requirement specifier
//!
//! # Example
//!
//! ```
//! use docify_ci::metadata::parse_metadata;
//! use std::path::Path;
//!
//! let meta = parse_metadata(
//!     "requests",
//!     "version = \"2.31.*\"\n[tool.stubtest]\nextras = [\"socks\"]\n",
//!     Path::new("stubs/requests/METADATA.toml"),
//! )
//! .unwrap();
//! assert_eq!(meta.make_requirement(false), "requests[socks]==2.31.*");
//! ```

pub mod loader;
pub mod requirement;
pub mod specifier;

pub use loader::{load_metadata, parse_metadata, StubMetadata, METADATA_FILE};
pub use specifier::{Operator, VersionSpecifier};
