//! Engine errors to the public error taxonomy.
//!
//! Only messages cross the boundary: source chains and structured engine
//! fields are rendered into the public message and then dropped.

use fetchkit_api as api;
use fetchkit_core::{
    Artifact, ArtifactError, EngineError, FetchError, ResolutionError, SimpleResolutionError,
};
use indexmap::IndexMap;

pub fn to_public_error(error: &EngineError) -> api::Error {
    match error {
        EngineError::Resolution(error) => to_public_resolution_error(error),
        EngineError::Fetch(error) => to_public_fetch_error(error),
        EngineError::Other { message, .. } => api::Error::Other {
            message: message.clone(),
        },
    }
}

pub fn to_public_resolution_error(error: &ResolutionError) -> api::Error {
    match error {
        ResolutionError::Simple(simple) => api::Error::SimpleResolution(to_public_simple(simple)),
        ResolutionError::Several { head, tail } => api::Error::MultipleResolution {
            message: error.to_string(),
            head: to_public_simple(head),
            tail: tail.iter().map(to_public_simple).collect(),
        },
        ResolutionError::Other { .. } => api::Error::Resolution {
            message: error.to_string(),
        },
    }
}

pub fn to_public_fetch_error(error: &FetchError) -> api::Error {
    match error {
        FetchError::DownloadingArtifacts { errors } if !errors.is_empty() => {
            api::Error::DownloadingArtifacts {
                message: error.to_string(),
                failures: failures(errors.iter().map(|(artifact, error)| (artifact, error))),
            }
        },
        // A download error without failures has nothing to list
        FetchError::DownloadingArtifacts { .. } | FetchError::Other { .. } => api::Error::Fetch {
            message: error.to_string(),
        },
    }
}

/// Failure of a single-artifact operation, as a one-entry download error
pub fn to_public_artifact_error(artifact: &Artifact, error: &ArtifactError) -> api::Error {
    api::Error::DownloadingArtifacts {
        message: format!("Error fetching {}: {}", artifact.url, error),
        failures: failures([(artifact, error)]),
    }
}

fn failures<'a>(
    errors: impl IntoIterator<Item = (&'a Artifact, &'a ArtifactError)>,
) -> IndexMap<String, String> {
    errors
        .into_iter()
        .map(|(artifact, error)| (artifact.url.clone(), error.describe()))
        .collect()
}

fn to_public_simple(error: &SimpleResolutionError) -> api::SimpleResolutionError {
    api::SimpleResolutionError::new(error.to_string())
}
