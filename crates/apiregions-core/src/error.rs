//! # Error Hierarchy
//!
//! Validation errors for the value types in this crate, built with
//! `thiserror`. Each variant carries the offending input so that a caller
//! loading regions from an external model can report exactly what was wrong.

use thiserror::Error;

/// Validation errors for domain primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The string is neither a Maven id nor a `mvn:` url.
    #[error("invalid artifact id \"{input}\": {reason}")]
    InvalidArtifactId {
        /// The rejected input, as given.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// An exported package must have a non-blank name.
    #[error("export name must not be empty")]
    EmptyExportName,
}

impl ValidationError {
    pub(crate) fn artifact(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArtifactId {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
