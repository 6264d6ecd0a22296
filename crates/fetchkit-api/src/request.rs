//! Requests and results of the public operations.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::cache::Cache;
use crate::types::{Artifact, Dependency, Module, Repository, ResolutionParams, VersionListing};

/// Resolve dependencies and download their artifacts
#[derive(Debug, Clone)]
pub struct Fetch {
    pub dependencies: Vec<Dependency>,
    pub bom_dependencies: Vec<Dependency>,
    /// Empty means the engine's default repositories
    pub repositories: Vec<Repository>,
    pub cache: Cache,
    pub classifiers: BTreeSet<String>,
    pub artifact_types: Option<BTreeSet<String>>,
    pub main_artifacts: Option<bool>,
    pub resolution_params: ResolutionParams,
    /// Return raw cache files instead of artifacts with metadata
    pub fetch_cache_files: Option<bool>,
}

impl Fetch {
    pub fn new(cache: Cache) -> Self {
        Self {
            dependencies: Vec::new(),
            bom_dependencies: Vec::new(),
            repositories: Vec::new(),
            cache,
            classifiers: BTreeSet::new(),
            artifact_types: None,
            main_artifacts: None,
            resolution_params: ResolutionParams::default(),
            fetch_cache_files: None,
        }
    }

    pub fn add_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn add_bom_dependency(mut self, dependency: Dependency) -> Self {
        self.bom_dependencies.push(dependency);
        self
    }

    pub fn add_repository(mut self, repository: Repository) -> Self {
        self.repositories.push(repository);
        self
    }

    pub fn with_classifiers<I, S>(mut self, classifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classifiers = classifiers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_artifact_types<I, S>(mut self, artifact_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.artifact_types = Some(artifact_types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_main_artifacts(mut self, main_artifacts: bool) -> Self {
        self.main_artifacts = Some(main_artifacts);
        self
    }

    pub fn with_resolution_params(mut self, params: ResolutionParams) -> Self {
        self.resolution_params = params;
        self
    }

    pub fn with_fetch_cache_files(mut self, fetch_cache_files: bool) -> Self {
        self.fetch_cache_files = Some(fetch_cache_files);
        self
    }
}

/// Outcome of a fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchResult {
    /// Downloaded artifacts and their local files, in engine order
    pub artifacts: Vec<(Artifact, PathBuf)>,
    /// Conflict-resolved dependencies, in engine order
    pub dependencies: Vec<Dependency>,
}

impl FetchResult {
    pub fn files(&self) -> Vec<&PathBuf> {
        self.artifacts.iter().map(|(_, file)| file).collect()
    }
}

/// Complete a partially typed module or version
#[derive(Debug, Clone)]
pub struct Complete {
    pub input: String,
    pub scala_version: Option<String>,
    pub scala_binary_version: Option<String>,
    pub repositories: Vec<Repository>,
    pub cache: Cache,
}

impl Complete {
    pub fn new(cache: Cache, input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            scala_version: None,
            scala_binary_version: None,
            repositories: Vec::new(),
            cache,
        }
    }

    pub fn with_scala_version(mut self, scala_version: impl Into<String>) -> Self {
        self.scala_version = Some(scala_version.into());
        self
    }

    pub fn with_scala_binary_version(mut self, scala_binary_version: impl Into<String>) -> Self {
        self.scala_binary_version = Some(scala_binary_version.into());
        self
    }

    pub fn add_repository(mut self, repository: Repository) -> Self {
        self.repositories.push(repository);
        self
    }
}

/// Completion candidates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompleteResult {
    /// Offset in the input where the completed segment starts
    pub from: usize,
    pub completions: Vec<String>,
}

/// List the versions of a module
#[derive(Debug, Clone)]
pub struct VersionsRequest {
    pub module: Module,
    pub repositories: Vec<Repository>,
    pub cache: Cache,
}

impl VersionsRequest {
    pub fn new(cache: Cache, module: Module) -> Self {
        Self {
            module,
            repositories: Vec::new(),
            cache,
        }
    }

    pub fn add_repository(mut self, repository: Repository) -> Self {
        self.repositories.push(repository);
        self
    }
}

/// Per-repository outcomes of a version listing, plus their merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionsResult {
    pub errors: Vec<(Repository, String)>,
    pub listings: Vec<(Repository, VersionListing)>,
    pub merged: VersionListing,
}
