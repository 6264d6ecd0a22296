//! Downloadable artifact references.

use std::collections::BTreeMap;

use super::Authentication;

/// A single downloadable file
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Artifact {
    pub url: String,
    /// Checksum type (`SHA-1`, `MD5`, ...) to checksum file URL
    pub checksum_urls: BTreeMap<String, String>,
    pub changing: bool,
    pub optional: bool,
    pub authentication: Option<Authentication>,
}

impl Artifact {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_changing(mut self, changing: bool) -> Self {
        self.changing = changing;
        self
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_authentication(mut self, authentication: Authentication) -> Self {
        self.authentication = Some(authentication);
        self
    }

    pub fn with_checksum_url(mut self, kind: impl Into<String>, url: impl Into<String>) -> Self {
        self.checksum_urls.insert(kind.into(), url.into());
        self
    }
}
