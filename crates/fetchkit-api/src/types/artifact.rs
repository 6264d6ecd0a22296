//! Downloadable artifact references.

use serde::{Deserialize, Serialize};

use super::Credentials;

/// A single downloadable file
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artifact {
    pub url: String,
    #[serde(default)]
    pub changing: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
}

impl Artifact {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Stand-in artifact for files that come without metadata
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn with_changing(mut self, changing: bool) -> Self {
        self.changing = changing;
        self
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }
}
