//! Repositories and credentials.

use serde::{Deserialize, Serialize};

use crate::foreign::Foreign;

/// User and password for a repository or an artifact
///
/// `password` is always present; an empty string means "no password".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

/// Maven-layout repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MavenRepository {
    pub root: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
}

/// Ivy-layout repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IvyRepository {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_pattern: Option<String>,
    #[serde(default)]
    pub drop_info_attributes: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
}

/// Source of metadata and artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repository {
    Maven(MavenRepository),
    Ivy(IvyRepository),
    /// Engine repository with no public representation, carried unchanged
    Opaque(Foreign),
}

impl Repository {
    pub fn central() -> Self {
        Self::maven("https://repo1.maven.org/maven2")
    }

    pub fn maven(root: impl Into<String>) -> Self {
        Repository::Maven(MavenRepository {
            root: root.into(),
            credentials: None,
        })
    }

    pub fn ivy(pattern: impl Into<String>) -> Self {
        Repository::Ivy(IvyRepository {
            pattern: pattern.into(),
            metadata_pattern: None,
            drop_info_attributes: false,
            credentials: None,
        })
    }

    /// Attach credentials; opaque repositories are returned unchanged
    pub fn with_credentials(self, credentials: Credentials) -> Self {
        match self {
            Repository::Maven(mut maven) => {
                maven.credentials = Some(credentials);
                Repository::Maven(maven)
            },
            Repository::Ivy(mut ivy) => {
                ivy.credentials = Some(credentials);
                Repository::Ivy(ivy)
            },
            opaque @ Repository::Opaque(_) => opaque,
        }
    }
}
