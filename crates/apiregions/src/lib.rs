//! # apiregions: Layered API Regions
//!
//! A [`Region`] is a named tier of exported packages. Regions form a linear
//! chain from the least restrictive tier (conventionally `global`) down to
//! ever more restrictive children; a region sees its own exports plus every
//! export of its ancestors.
//!
//! ```text
//! ApiRegions
//! ├── global    (root)   exports: org.example.api
//! ├── internal  (child)  exports: org.example.spi
//! └── private   (leaf)   exports: org.example.impl
//! ```
//!
//! ## Ownership
//!
//! Regions never point at each other directly. Parent and child links are
//! [`RegionId`] handles into an [`ApiRegions`] registry, which owns every
//! region and is the only code that changes links. Linking rejects cycles,
//! so chain traversal always terminates.
//!
//! ## Concurrency
//!
//! Everything here is plain owned data. Mutation needs `&mut`, so a registry
//! is built by one writer and may then be shared read-only across threads.

pub mod config;
pub mod error;
pub mod region;
pub mod registry;

pub use config::RegistryConfig;
pub use error::{ConfigError, LinkKind, RegionError, RegionResult};
pub use region::{Region, RegionId, GLOBAL_REGION};
pub use registry::{ApiRegions, RegionMut};

// Value types regions are built from.
pub use apiregions_core::{
    ApiExport, ArtifactId, Deprecation, DeprecationInfo, DeprecationValidationMode,
    ValidationError, FEATURE_ORIGINS_KEY,
};
