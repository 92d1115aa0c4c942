//! Region-specific error types.
//!
//! Ordinary misuse of a single region (duplicate add, missing remove, unknown
//! export name) is reported through return values. The errors here cover the
//! linking layer, where a rejected operation would otherwise break the chain,
//! and configuration loading.

use std::fmt;

use apiregions_core::ValidationError;
use thiserror::Error;

use crate::region::RegionId;

/// Which side of a chain link an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// The link towards the root.
    Parent,
    /// The link away from the root.
    Child,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent => f.write_str("parent"),
            Self::Child => f.write_str("child"),
        }
    }
}

/// Errors raised by [`ApiRegions`](crate::ApiRegions) operations.
#[derive(Debug, Error)]
pub enum RegionError {
    /// The handle does not refer to a live region in this registry.
    #[error("unknown region {0}")]
    UnknownRegion(RegionId),

    /// A region cannot be its own parent.
    #[error("region \"{region}\" cannot be linked to itself")]
    SelfLink { region: String },

    /// The chain is linear; a region holds at most one parent and one child.
    #[error("region \"{region}\" already has a {link}")]
    AlreadyLinked { region: String, link: LinkKind },

    /// The child is already an ancestor of the parent.
    #[error("linking \"{parent}\" -> \"{child}\" would create a cycle")]
    CycleDetected { parent: String, child: String },

    /// A stored value failed validation (e.g. a malformed feature origin).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for region operations.
pub type RegionResult<T> = Result<T, RegionError>;

/// Errors loading a [`RegistryConfig`](crate::RegistryConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid YAML for the configuration schema.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document parsed but a value is unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_linked_display() {
        let err = RegionError::AlreadyLinked {
            region: "global".to_string(),
            link: LinkKind::Child,
        };
        assert_eq!(format!("{err}"), "region \"global\" already has a child");
    }

    #[test]
    fn cycle_display_names_both_regions() {
        let err = RegionError::CycleDetected {
            parent: "internal".to_string(),
            child: "global".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("\"internal\" -> \"global\""));
    }

    #[test]
    fn validation_from_conversion() {
        let err = RegionError::from(ValidationError::EmptyExportName);
        assert!(format!("{err}").contains("export name must not be empty"));
    }

    #[test]
    fn config_invalid_display() {
        let err = ConfigError::Invalid("global_region must not be blank".to_string());
        assert!(format!("{err}").contains("global_region"));
    }
}
