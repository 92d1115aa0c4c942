//! # Registry Configuration
//!
//! Settings for [`ApiRegions`](crate::ApiRegions), loadable from YAML. Every
//! field has a default, so an embedding application only spells out what it
//! changes:
//!
//! ```yaml
//! global_region: platform
//! auto_link: false
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::region::GLOBAL_REGION;

/// Configuration for a region registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Name of the least restrictive tier, returned by
    /// [`ApiRegions::global`](crate::ApiRegions::global).
    pub global_region: String,
    /// Whether [`ApiRegions::add`](crate::ApiRegions::add) appends each new
    /// region as the child of the previously added one.
    pub auto_link: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            global_region: GLOBAL_REGION.to_string(),
            auto_link: true,
        }
    }
}

impl RegistryConfig {
    /// Parse and validate a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] for malformed YAML or unknown keys, and
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `global_region` is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.global_region.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "global_region must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.global_region, "global");
        assert!(config.auto_link);
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let config = RegistryConfig::from_yaml_str("auto_link: false\n").unwrap();
        assert!(!config.auto_link);
        assert_eq!(config.global_region, "global");
    }

    #[test]
    fn full_document() {
        let yaml = "global_region: platform\nauto_link: true\n";
        let config = RegistryConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.global_region, "platform");
    }

    #[test]
    fn unknown_key_rejected() {
        let err = RegistryConfig::from_yaml_str("auto_link: true\nfan_out: 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn blank_global_region_rejected() {
        let err = RegistryConfig::from_yaml_str("global_region: \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
