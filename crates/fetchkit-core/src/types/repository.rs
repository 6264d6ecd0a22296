//! Repository and authentication types.

use std::fmt;
use std::sync::Arc;

use crate::parse::pattern::{Pattern, PatternError};

/// Credentials attached to a repository or an artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Authentication {
    pub user: String,
    pub password: Option<String>,
    pub realm: Option<String>,
    pub https_only: bool,
}

impl Authentication {
    /// Create user/password credentials
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: Some(password.into()),
            realm: None,
            https_only: true,
        }
    }

    /// Credentials with a user name only
    pub fn user_only(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: None,
            realm: None,
            https_only: true,
        }
    }

    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }
}

/// Maven-layout repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenRepository {
    pub root: String,
    pub authentication: Option<Authentication>,
    pub changing: Option<bool>,
}

impl MavenRepository {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            authentication: None,
            changing: None,
        }
    }

    pub fn with_authentication(mut self, authentication: Authentication) -> Self {
        self.authentication = Some(authentication);
        self
    }
}

/// Ivy-layout repository described by artifact (and metadata) patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IvyRepository {
    pub pattern: Pattern,
    pub metadata_pattern: Option<Pattern>,
    pub authentication: Option<Authentication>,
    pub drop_info_attributes: bool,
}

impl IvyRepository {
    /// Parse the patterns of an Ivy repository
    pub fn parse(
        pattern: &str,
        metadata_pattern: Option<&str>,
        authentication: Option<Authentication>,
        drop_info_attributes: bool,
    ) -> Result<Self, PatternError> {
        let pattern = Pattern::parse(pattern)?;
        let metadata_pattern = metadata_pattern.map(Pattern::parse).transpose()?;

        Ok(Self {
            pattern,
            metadata_pattern,
            authentication,
            drop_info_attributes,
        })
    }
}

/// Repository implementation the engine knows about but that has no
/// dedicated representation in this model
pub trait CustomRepository: fmt::Debug + Send + Sync {
    /// Human readable description, used in diagnostics
    fn describe(&self) -> String;
}

/// Source of metadata and artifacts
#[derive(Debug, Clone)]
pub enum Repository {
    Maven(MavenRepository),
    Ivy(IvyRepository),
    Custom(Arc<dyn CustomRepository>),
}

impl Repository {
    /// The repository the engine uses when none is given
    pub fn central() -> Self {
        Repository::Maven(MavenRepository::new("https://repo1.maven.org/maven2"))
    }

    /// Short description for logs and error messages
    pub fn describe(&self) -> String {
        match self {
            Repository::Maven(maven) => maven.root.clone(),
            Repository::Ivy(ivy) => ivy.pattern.to_string(),
            Repository::Custom(custom) => custom.describe(),
        }
    }
}

impl PartialEq for Repository {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Repository::Maven(a), Repository::Maven(b)) => a == b,
            (Repository::Ivy(a), Repository::Ivy(b)) => a == b,
            // Custom repositories only compare equal to themselves
            (Repository::Custom(a), Repository::Custom(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            },
            _ => false,
        }
    }
}

impl Eq for Repository {}
