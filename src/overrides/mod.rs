//! Override resolution.
//!
//! Turns loaded [`StubMetadata`](crate::metadata::StubMetadata) into a
//! three-way [`Resolution`]: proceed with the adjusted package, skip it for a
//! stated reason, or fail because it could not be loaded. Resolution is a pure
//! function of the metadata, the [`ResolveContext`] and the override tables.

pub mod resolver;

pub use resolver::{
    resolve, resolve_package, Resolution, ResolveContext, ResolvedPackage, SkipReason,
};
