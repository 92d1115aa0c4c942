//! # Artifact Identifiers
//!
//! Maven-style coordinates identifying the feature artifacts a region was
//! assembled from. Two textual forms are accepted:
//!
//! - **mvn id**: `group:artifact:version`, `group:artifact:type:version` or
//!   `group:artifact:type:classifier:version`
//! - **mvn url**: `mvn:group/artifact/version[/type[/classifier]]`
//!
//! The canonical string form is the mvn id with the type omitted when it is
//! the default `jar` and no classifier is present. That form is what gets
//! stored in region properties, so it must round-trip through
//! [`ArtifactId::parse`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Property key under which a region (or export) records the comma-separated
/// canonical ids of the features it originates from.
///
/// The exact spelling is visible to anything that persists property maps.
pub const FEATURE_ORIGINS_KEY: &str = "feature-origins";

/// Type assumed when coordinates do not name one.
pub const DEFAULT_ARTIFACT_TYPE: &str = "jar";

const MVN_URL_PREFIX: &str = "mvn:";

/// Maven coordinates of an artifact.
///
/// # Validation
///
/// - Group id, artifact id and version must be non-empty.
/// - No coordinate may be blank or carry leading or trailing whitespace.
/// - No coordinate may contain `:`, `/` or `,` (they would break the
///   canonical form or the comma-joined origins list).
/// - An empty type becomes `jar`; an empty classifier becomes absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactId {
    group_id: String,
    artifact_id: String,
    version: String,
    artifact_type: String,
    classifier: Option<String>,
}

impl ArtifactId {
    /// Create a `jar` artifact id without classifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidArtifactId`] if any coordinate is
    /// empty, padded with whitespace or contains a reserved separator.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let id = Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            artifact_type: DEFAULT_ARTIFACT_TYPE.to_string(),
            classifier: None,
        };
        id.validate()?;
        Ok(id)
    }

    /// Replace the artifact type. An empty type resets it to `jar`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidArtifactId`] if the type contains a
    /// reserved separator.
    pub fn with_type(mut self, artifact_type: impl Into<String>) -> Result<Self, ValidationError> {
        let artifact_type = artifact_type.into();
        self.artifact_type = if artifact_type.is_empty() {
            DEFAULT_ARTIFACT_TYPE.to_string()
        } else {
            artifact_type
        };
        self.validate()?;
        Ok(self)
    }

    /// Replace the classifier. An empty classifier clears it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidArtifactId`] if the classifier is
    /// padded with whitespace or contains a reserved separator.
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Result<Self, ValidationError> {
        let classifier = classifier.into();
        self.classifier = if classifier.is_empty() {
            None
        } else {
            Some(classifier)
        };
        self.validate()?;
        Ok(self)
    }

    /// Parse either textual form. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidArtifactId`] if the input is neither
    /// a valid mvn id nor a valid mvn url.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if let Some(path) = s.strip_prefix(MVN_URL_PREFIX) {
            Self::from_mvn_path(input, path)
        } else if s.contains(':') {
            Self::from_mvn_id(input, s)
        } else if s.contains('/') {
            Self::from_mvn_path(input, s)
        } else {
            Err(ValidationError::artifact(
                input,
                "expected group:artifact[:type[:classifier]]:version or mvn:group/artifact/version",
            ))
        }
    }

    fn from_mvn_id(input: &str, s: &str) -> Result<Self, ValidationError> {
        let parts: Vec<&str> = s.split(':').collect();
        if !(3..=5).contains(&parts.len()) {
            return Err(ValidationError::artifact(
                input,
                format!("expected 3 to 5 ':'-separated segments, found {}", parts.len()),
            ));
        }
        let version = parts[parts.len() - 1];
        let mut id = Self::new(parts[0], parts[1], version).map_err(|e| reframe(input, e))?;
        if parts.len() > 3 {
            id = id.with_type(parts[2]).map_err(|e| reframe(input, e))?;
        }
        if parts.len() > 4 {
            id = id.with_classifier(parts[3]).map_err(|e| reframe(input, e))?;
        }
        Ok(id)
    }

    fn from_mvn_path(input: &str, path: &str) -> Result<Self, ValidationError> {
        let parts: Vec<&str> = path.split('/').collect();
        if !(3..=5).contains(&parts.len()) {
            return Err(ValidationError::artifact(
                input,
                format!("expected 3 to 5 '/'-separated segments, found {}", parts.len()),
            ));
        }
        let mut id = Self::new(parts[0], parts[1], parts[2]).map_err(|e| reframe(input, e))?;
        if let Some(artifact_type) = parts.get(3) {
            id = id.with_type(*artifact_type).map_err(|e| reframe(input, e))?;
        }
        if let Some(classifier) = parts.get(4) {
            id = id.with_classifier(*classifier).map_err(|e| reframe(input, e))?;
        }
        Ok(id)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("group id", self.group_id.as_str()),
            ("artifact id", self.artifact_id.as_str()),
            ("version", self.version.as_str()),
        ];
        for (what, value) in required {
            if value.is_empty() {
                return Err(ValidationError::artifact(
                    &self.describe(),
                    format!("{what} must not be empty"),
                ));
            }
        }
        let optional = [
            ("type", Some(self.artifact_type.as_str())),
            ("classifier", self.classifier.as_deref()),
        ];
        for (what, value) in required.iter().map(|(w, v)| (*w, Some(*v))).chain(optional) {
            if let Some(v) = value {
                if v.trim() != v {
                    return Err(ValidationError::artifact(
                        &self.describe(),
                        format!("{what} \"{v}\" has surrounding whitespace"),
                    ));
                }
                if v.contains([':', '/', ',']) {
                    return Err(ValidationError::artifact(
                        &self.describe(),
                        format!("{what} \"{v}\" contains a reserved separator"),
                    ));
                }
            }
        }
        Ok(())
    }

    // Raw coordinates for error messages; the value may not be valid yet.
    fn describe(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }

    /// The group id.
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// The artifact id.
    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    /// The version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The artifact type, `jar` unless set otherwise.
    pub fn artifact_type(&self) -> &str {
        &self.artifact_type
    }

    /// The classifier, if any.
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    /// Whether both ids name the same artifact, ignoring the version.
    pub fn is_same(&self, other: &ArtifactId) -> bool {
        self.group_id == other.group_id
            && self.artifact_id == other.artifact_id
            && self.artifact_type == other.artifact_type
            && self.classifier == other.classifier
    }

    /// Canonical mvn id: `group:artifact[:type[:classifier]]:version`.
    pub fn to_mvn_id(&self) -> String {
        let mut s = format!("{}:{}", self.group_id, self.artifact_id);
        match &self.classifier {
            Some(classifier) => {
                s.push(':');
                s.push_str(&self.artifact_type);
                s.push(':');
                s.push_str(classifier);
            }
            None if self.artifact_type != DEFAULT_ARTIFACT_TYPE => {
                s.push(':');
                s.push_str(&self.artifact_type);
            }
            None => {}
        }
        s.push(':');
        s.push_str(&self.version);
        s
    }

    /// mvn url: `mvn:group/artifact/version[/type[/classifier]]`.
    pub fn to_mvn_url(&self) -> String {
        let mut s = format!(
            "{MVN_URL_PREFIX}{}/{}/{}",
            self.group_id, self.artifact_id, self.version
        );
        if self.classifier.is_some() || self.artifact_type != DEFAULT_ARTIFACT_TYPE {
            s.push('/');
            s.push_str(&self.artifact_type);
        }
        if let Some(classifier) = &self.classifier {
            s.push('/');
            s.push_str(classifier);
        }
        s
    }
}

// Report the caller's original input rather than the partially built id.
fn reframe(input: &str, err: ValidationError) -> ValidationError {
    match err {
        ValidationError::InvalidArtifactId { reason, .. } => ValidationError::artifact(input, reason),
        other => other,
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_mvn_id())
    }
}

impl FromStr for ArtifactId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ArtifactId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ArtifactId> for String {
    fn from(id: ArtifactId) -> Self {
        id.to_mvn_id()
    }
}
