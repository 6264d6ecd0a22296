//! Public error taxonomy.
//!
//! Engine failures reach callers as one of a fixed set of shapes, plus
//! `InvalidArgument` for input rejected before any engine call. Callers
//! match on the variant; messages are for humans.

use indexmap::IndexMap;
use thiserror::Error;

/// Error returned by every public operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed coordinates, repository or cache definition
    #[error("{message}")]
    InvalidArgument { message: String },

    /// Some artifacts could not be downloaded
    #[error("{message}")]
    DownloadingArtifacts {
        message: String,
        /// Artifact URL to failure description, never empty
        failures: IndexMap<String, String>,
    },

    #[error("{message}")]
    Fetch { message: String },

    #[error("{message}")]
    MultipleResolution {
        message: String,
        head: SimpleResolutionError,
        tail: Vec<SimpleResolutionError>,
    },

    #[error(transparent)]
    SimpleResolution(SimpleResolutionError),

    #[error("{message}")]
    Resolution { message: String },

    #[error("{message}")]
    Other { message: String },
}

/// A single resolution diagnostic
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SimpleResolutionError {
    pub message: String,
}

/// Result type alias for public operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Error::InvalidArgument { message }
            | Error::DownloadingArtifacts { message, .. }
            | Error::Fetch { message }
            | Error::MultipleResolution { message, .. }
            | Error::SimpleResolution(SimpleResolutionError { message })
            | Error::Resolution { message }
            | Error::Other { message } => message,
        }
    }

    /// Any resolution failure, single, multiple or generic
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Error::MultipleResolution { .. } | Error::SimpleResolution(_) | Error::Resolution { .. }
        )
    }

    /// Any failure of the artifact layer
    pub fn is_download(&self) -> bool {
        matches!(self, Error::DownloadingArtifacts { .. } | Error::Fetch { .. })
    }
}

impl SimpleResolutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let error = Error::SimpleResolution(SimpleResolutionError::new("missing"));
        assert!(error.is_resolution());
        assert!(!error.is_download());
        assert_eq!(error.message(), "missing");
        assert_eq!(error.to_string(), "missing");

        let error = Error::Fetch {
            message: "boom".to_string(),
        };
        assert!(error.is_download());
        assert!(!Error::invalid_argument("bad").is_resolution());
    }
}
