//! Error types and result aliases for engine operations.
//!
//! Errors are layered the way the engine produces them: a top-level
//! `EngineError` wraps resolution failures (single or several), fetch-layer
//! failures (including per-artifact download failures) and anything else.

use thiserror::Error;

use crate::types::{Artifact, Module};

/// Top-level error of an engine call
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{message}")]
    Other {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Failure while computing the dependency graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error(transparent)]
    Simple(#[from] SimpleResolutionError),

    #[error("{head}{}", render_tail(.tail))]
    Several {
        head: SimpleResolutionError,
        tail: Vec<SimpleResolutionError>,
    },

    #[error("Resolution failed: {message}")]
    Other { message: String },
}

/// A single resolution diagnostic
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimpleResolutionError {
    #[error("Error downloading {module}:{version}{}", render_lines(.per_repository_errors))]
    CantDownloadModule {
        module: Module,
        version: String,
        per_repository_errors: Vec<String>,
    },

    #[error("Conflicting dependencies:{}", render_conflicts(.dependencies))]
    ConflictingDependencies { dependencies: Vec<(Module, String)> },

    #[error("Maximum number of iterations reached ({max_iterations})")]
    MaximumIterationReached { max_iterations: u32 },

    #[error("{message}")]
    Other { message: String },
}

/// Failure in the artifact layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Error fetching artifacts:{}", render_downloads(.errors))]
    DownloadingArtifacts { errors: Vec<(Artifact, ArtifactError)> },

    #[error("{message}")]
    Other { message: String },
}

/// Failure to get a single artifact into the cache
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArtifactError {
    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("download error: {reason}")]
    DownloadError { reason: String },

    #[error("wrong checksum for {url} (expected {expected}, got {got})")]
    WrongChecksum {
        url: String,
        expected: String,
        got: String,
    },

    #[error("unauthorized: {url}")]
    Unauthorized { url: String, realm: Option<String> },

    #[error("locked: {url}")]
    Locked { url: String },

    #[error("not accessible: {url} ({message})")]
    NotAccessible { url: String, message: String },
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

fn render_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("\n  {}", line)).collect()
}

fn render_tail(tail: &[SimpleResolutionError]) -> String {
    tail.iter().map(|error| format!("\n{}", error)).collect()
}

fn render_conflicts(dependencies: &[(Module, String)]) -> String {
    dependencies
        .iter()
        .map(|(module, version)| format!("\n  {}:{}", module, version))
        .collect()
}

fn render_downloads(errors: &[(Artifact, ArtifactError)]) -> String {
    errors
        .iter()
        .map(|(artifact, error)| format!("\n  {}: {}", artifact.url, error))
        .collect()
}

impl EngineError {
    /// Create a catch-all error from any error type
    pub fn other<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Other {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Catch-all error with a message only
    pub fn message(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            source: None,
        }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            EngineError::Resolution(ResolutionError::Simple(
                SimpleResolutionError::CantDownloadModule { .. },
            )) => Some("Check the module coordinates and the repositories you resolve from"),
            EngineError::Resolution(ResolutionError::Simple(
                SimpleResolutionError::ConflictingDependencies { .. },
            )) => Some("Force a version of the conflicting module or exclude one side"),
            EngineError::Resolution(ResolutionError::Simple(
                SimpleResolutionError::MaximumIterationReached { .. },
            )) => Some("Increase the maximum number of iterations"),
            EngineError::Fetch(FetchError::DownloadingArtifacts { .. }) => {
                Some("Check your network connection and repository credentials")
            },
            _ => None,
        }
    }
}

impl ResolutionError {
    /// Build from a list of diagnostics; `None` when the list is empty
    pub fn from_errors(errors: Vec<SimpleResolutionError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let head = errors.next()?;
        let tail: Vec<_> = errors.collect();
        if tail.is_empty() {
            Some(ResolutionError::Simple(head))
        } else {
            Some(ResolutionError::Several { head, tail })
        }
    }
}

impl ArtifactError {
    /// Human readable description of the failure
    pub fn describe(&self) -> String {
        self.to_string()
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ArtifactError::NotFound { .. })
    }
}
