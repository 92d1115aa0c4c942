#![deny(missing_docs)]

//! # apiregions-core: Foundational Types for API Regions
//!
//! This crate defines the value types every region operation is built from.
//! It has no internal crate dependencies, only `serde` and `thiserror` from
//! the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Validated identifiers.** An [`ArtifactId`] can only be obtained through
//!    a validating constructor or [`ArtifactId::parse`]. There is no way to
//!    hold a coordinate with an empty group, artifact or version.
//!
//! 2. **Name is identity, value is equality.** An [`ApiExport`] is keyed by its
//!    package name inside a region, but compares and hashes over every field.
//!    Callers that deduplicate by name and callers that compare by value both
//!    get what they ask for.
//!
//! 3. **[`ValidationError`] hierarchy.** Structured errors with `thiserror`:
//!    no `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod artifact;
pub mod error;
pub mod export;

// Re-export primary types at crate root for ergonomic imports.
pub use artifact::{ArtifactId, DEFAULT_ARTIFACT_TYPE, FEATURE_ORIGINS_KEY};
pub use error::ValidationError;
pub use export::{ApiExport, Deprecation, DeprecationInfo, DeprecationValidationMode};
