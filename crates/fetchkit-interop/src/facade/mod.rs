//! Public operations over an engine.
//!
//! Every operation converts its public inputs, runs the engine call on the
//! pool of the cache it was given, and converts the outcome back. Engine
//! failures are returned as `Err`; nothing is retried.

use std::cmp::Ordering;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use fetchkit_api as api;
use fetchkit_core::{
    Artifact, Complete, Engine, EngineError, EngineResult, JvmIndex, Resolution, Version, Versions,
};
use tracing::{debug, warn};

use crate::cache::{to_internal_archive_cache, to_internal_cache};
use crate::entity::{
    to_internal_artifact, to_internal_module, to_public_artifact, to_public_dependency,
    to_public_repository, to_public_versions,
};
use crate::error::{to_public_artifact_error, to_public_error};
use crate::params::{fetch_requests, to_internal_repositories};

/// Public entry point wrapping an engine
#[derive(Debug, Clone, Default)]
pub struct Bridge<E> {
    engine: E,
}

impl<E: Engine> Bridge<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Resolve the dependencies of a request and download their artifacts
    pub fn fetch(&self, request: &api::Fetch) -> api::Result<api::FetchResult> {
        let (resolve, artifacts) = fetch_requests(request)?;
        let fetch_cache_files = request.fetch_cache_files.unwrap_or(false);
        debug!(
            dependencies = resolve.dependencies.len(),
            repositories = resolve.repositories.len(),
            fetch_cache_files,
            "fetching"
        );

        let engine = &self.engine;
        let outcome: EngineResult<(Resolution, Vec<(Option<Artifact>, Utf8PathBuf)>)> =
            resolve.cache.run(|| {
                let resolution = engine.resolve(&resolve)?;
                let files = if fetch_cache_files {
                    engine
                        .fetch_cache_files(&artifacts, &resolution)?
                        .into_iter()
                        .map(|file| (None, file))
                        .collect()
                } else {
                    engine
                        .fetch_artifacts(&artifacts, &resolution)?
                        .into_iter()
                        .map(|(artifact, file)| (Some(artifact), file))
                        .collect()
                };
                Ok((resolution, files))
            });

        let (resolution, files) = outcome.map_err(|error| failed("fetch", &error))?;
        debug!(
            dependencies = resolution.ordered_dependencies.len(),
            files = files.len(),
            "fetched"
        );

        Ok(api::FetchResult {
            artifacts: files
                .into_iter()
                .map(|(artifact, file)| {
                    let artifact = artifact
                        .as_ref()
                        .map(to_public_artifact)
                        .unwrap_or_else(api::Artifact::placeholder);
                    (artifact, file.into_std_path_buf())
                })
                .collect(),
            dependencies: resolution
                .ordered_dependencies
                .iter()
                .map(to_public_dependency)
                .collect(),
        })
    }

    /// Complete a partially typed coordinate
    pub fn complete(&self, request: &api::Complete) -> api::Result<api::CompleteResult> {
        let cache = to_internal_cache(&request.cache)?;
        let complete = Complete {
            input: request.input.clone(),
            scala_version: request.scala_version.clone(),
            scala_binary_version: request.scala_binary_version.clone(),
            repositories: to_internal_repositories(&request.repositories)?,
            cache: cache.clone(),
        };
        debug!(input = %complete.input, "completing");

        let completion = cache
            .run(|| self.engine.complete(&complete))
            .map_err(|error| failed("complete", &error))?;

        Ok(api::CompleteResult {
            from: completion.from,
            completions: completion.completions,
        })
    }

    /// List the versions of a module in each repository, then merge them
    ///
    /// A repository that fails to list is reported in `errors` and left out
    /// of the merge; it does not fail the call.
    pub fn versions(&self, request: &api::VersionsRequest) -> api::Result<api::VersionsResult> {
        let cache = to_internal_cache(&request.cache)?;
        let module = to_internal_module(&request.module);
        let repositories = to_internal_repositories(&request.repositories)?;
        debug!(%module, repositories = repositories.len(), "listing versions");

        let mut errors = Vec::new();
        let mut listings: Vec<(api::Repository, Versions)> = Vec::new();
        for repository in &repositories {
            match cache.run(|| self.engine.list_versions(&cache, &module, repository)) {
                Ok(versions) => listings.push((to_public_repository(repository), versions)),
                Err(message) => {
                    warn!(%module, repository = %repository.describe(), %message, "version listing failed");
                    errors.push((to_public_repository(repository), message));
                },
            }
        }

        let merged = Versions::merge(listings.iter().map(|(_, versions)| versions));
        Ok(api::VersionsResult {
            errors,
            listings: listings
                .iter()
                .map(|(repository, versions)| (repository.clone(), to_public_versions(versions)))
                .collect(),
            merged: to_public_versions(&merged),
        })
    }

    /// Download a single artifact into the cache
    pub fn cache_get(&self, cache: &api::Cache, artifact: &api::Artifact) -> api::Result<PathBuf> {
        let cache = to_internal_cache(cache)?;
        let artifact = to_internal_artifact(artifact);
        debug!(url = %artifact.url, "getting artifact");

        cache
            .run(|| self.engine.cache_file(&cache, &artifact))
            .map(Utf8PathBuf::into_std_path_buf)
            .map_err(|error| {
                warn!(url = %artifact.url, %error, "artifact download failed");
                to_public_artifact_error(&artifact, &error)
            })
    }

    /// Download and extract an archive
    pub fn archive_cache_get(
        &self,
        cache: &api::ArchiveCache,
        artifact: &api::Artifact,
    ) -> api::Result<PathBuf> {
        let cache = to_internal_archive_cache(cache)?;
        let artifact = to_internal_artifact(artifact);
        debug!(url = %artifact.url, "getting archive");

        cache
            .cache
            .run(|| self.engine.archive_file(&cache, &artifact))
            .map(Utf8PathBuf::into_std_path_buf)
            .map_err(|error| {
                warn!(url = %artifact.url, %error, "archive download failed");
                to_public_artifact_error(&artifact, &error)
            })
    }

    /// Extracted archive if it is already cached; never downloads
    pub fn archive_cache_get_if_exists(
        &self,
        cache: &api::ArchiveCache,
        artifact: &api::Artifact,
    ) -> api::Result<Option<PathBuf>> {
        let cache = to_internal_archive_cache(cache)?;
        let artifact = to_internal_artifact(artifact);
        debug!(url = %artifact.url, "looking up cached archive");

        cache
            .cache
            .run(|| self.engine.archive_file_if_exists(&cache, &artifact))
            .map(|file| file.map(Utf8PathBuf::into_std_path_buf))
            .map_err(|error| {
                warn!(url = %artifact.url, %error, "cached archive lookup failed");
                to_public_artifact_error(&artifact, &error)
            })
    }

    /// Install if needed, then locate the JVM `id`, using the default index
    pub fn jvm_manager_get(&self, cache: &api::ArchiveCache, id: &str) -> api::Result<PathBuf> {
        let cache = to_internal_archive_cache(cache)?;
        debug!(id, "getting JVM");

        cache
            .cache
            .run(|| self.engine.jvm_home(&cache, &JvmIndex::Default, id))
            .map(Utf8PathBuf::into_std_path_buf)
            .map_err(|error| failed("jvm", &error))
    }
}

fn failed(operation: &str, error: &EngineError) -> api::Error {
    match error.suggestion() {
        Some(suggestion) => warn!(operation, %error, suggestion, "engine call failed"),
        None => warn!(operation, %error, "engine call failed"),
    }
    to_public_error(error)
}

/// Order two version strings: -1, 0 or 1
pub fn compare_versions(a: &str, b: &str) -> i32 {
    match Version::parse(a).cmp(&Version::parse(b)) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

#[cfg(test)]
mod tests;
