//! # Exported Package Descriptors
//!
//! An [`ApiExport`] describes one Java-style package a region makes visible,
//! together with the metadata a feature model attaches to it: an optional
//! feature toggle, the artifact that provided the package before the toggle
//! was introduced, deprecation notes and free-form properties.
//!
//! Inside a region the package name is the identity key. Equality and
//! hashing cover every field, so two descriptors for the same package with
//! different metadata are distinct values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactId;
use crate::error::ValidationError;

/// How consumers of a deprecated API should be treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeprecationValidationMode {
    /// Report usage as a warning.
    #[default]
    Warn,
    /// Report usage as an error.
    Error,
}

/// A single deprecation note.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeprecationInfo {
    /// Human-readable explanation, usually naming the replacement.
    pub message: String,
    /// Version or date since which the API is deprecated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    /// Version or date at which the API is scheduled for removal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_removal: Option<String>,
    /// Validation mode for consumers.
    #[serde(default)]
    pub mode: DeprecationValidationMode,
}

impl DeprecationInfo {
    /// Create a note with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            since: None,
            for_removal: None,
            mode: DeprecationValidationMode::Warn,
        }
    }

    /// Set the version the deprecation applies since.
    pub fn since(mut self, since: impl Into<String>) -> Self {
        self.since = Some(since.into());
        self
    }

    /// Set the planned removal.
    pub fn for_removal(mut self, for_removal: impl Into<String>) -> Self {
        self.for_removal = Some(for_removal.into());
        self
    }

    /// Set the validation mode.
    pub fn mode(mut self, mode: DeprecationValidationMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Deprecation state of a package: either the whole package, or individual
/// members (classes, or `Class#member`) within it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deprecation {
    /// Deprecation of the package as a whole.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<DeprecationInfo>,
    /// Deprecations of individual members, keyed by member name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub members: BTreeMap<String, DeprecationInfo>,
}

impl Deprecation {
    /// Whether nothing is deprecated.
    pub fn is_empty(&self) -> bool {
        self.package.is_none() && self.members.is_empty()
    }
}

/// An exported package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApiExport {
    name: String,
    /// Feature toggle that must be enabled for the export to be visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toggle: Option<String>,
    /// Artifact providing the package while the toggle is disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<ArtifactId>,
    /// Package version exported by [`previous`](Self::previous).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_package_version: Option<String>,
    /// Deprecation notes.
    #[serde(default, skip_serializing_if = "Deprecation::is_empty")]
    pub deprecation: Deprecation,
    /// Additional properties.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl ApiExport {
    /// Create an export for the named package with no metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyExportName`] if the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyExportName);
        }
        Ok(Self {
            name,
            toggle: None,
            previous: None,
            previous_package_version: None,
            deprecation: Deprecation::default(),
            properties: BTreeMap::new(),
        })
    }

    /// The package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check invariants on a deserialized value, which bypasses [`ApiExport::new`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyExportName`] if the name is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyExportName);
        }
        Ok(())
    }

    /// Attach a feature toggle.
    pub fn with_toggle(mut self, toggle: impl Into<String>) -> Self {
        self.toggle = Some(toggle.into());
        self
    }

    /// Attach the artifact that provided the package before the toggle.
    pub fn with_previous(mut self, previous: ArtifactId) -> Self {
        self.previous = Some(previous);
        self
    }

    /// Mark the whole package deprecated.
    pub fn deprecated(mut self, info: DeprecationInfo) -> Self {
        self.deprecation.package = Some(info);
        self
    }

    /// Mark a single member deprecated.
    pub fn deprecated_member(mut self, member: impl Into<String>, info: DeprecationInfo) -> Self {
        self.deprecation.members.insert(member.into(), info);
        self
    }
}

impl std::fmt::Display for ApiExport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(toggle) = &self.toggle {
            write!(f, " [toggle={toggle}]")?;
        }
        Ok(())
    }
}
