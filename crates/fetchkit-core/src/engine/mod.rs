//! Engine contract.
//!
//! Dependency resolution, downloads, archive extraction and JVM management
//! are implemented behind `Engine`. Each method is one blocking call; callers
//! schedule it on the pool of the cache they pass in.

use std::collections::BTreeSet;

use camino::Utf8PathBuf;

use crate::cache::{ArchiveCache, FileCache};
use crate::error::{ArtifactError, EngineResult, FetchError, ResolutionError};
use crate::types::{
    Artifact, Classifier, Dependency, Module, Repository, ResolutionParams, Type, Versions,
};

/// Dependency resolution request
#[derive(Debug, Clone)]
pub struct Resolve {
    pub dependencies: Vec<Dependency>,
    pub bom_dependencies: Vec<Dependency>,
    pub repositories: Vec<Repository>,
    pub params: ResolutionParams,
    pub cache: FileCache,
}

impl Resolve {
    /// Request resolving against the default repositories
    pub fn new(cache: FileCache) -> Self {
        Self {
            dependencies: Vec::new(),
            bom_dependencies: Vec::new(),
            repositories: Self::default_repositories(),
            params: ResolutionParams::default(),
            cache,
        }
    }

    /// Repositories used when a request names none
    pub fn default_repositories() -> Vec<Repository> {
        vec![Repository::central()]
    }

    pub fn with_dependencies(mut self, dependencies: Vec<Dependency>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_bom_dependencies(mut self, bom_dependencies: Vec<Dependency>) -> Self {
        self.bom_dependencies = bom_dependencies;
        self
    }

    pub fn with_repositories(mut self, repositories: Vec<Repository>) -> Self {
        self.repositories = repositories;
        self
    }

    pub fn with_params(mut self, params: ResolutionParams) -> Self {
        self.params = params;
        self
    }
}

/// Artifact selection request, run on the result of a `Resolve`
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub cache: FileCache,
    pub classifiers: BTreeSet<Classifier>,
    pub main_artifacts: Option<bool>,
    pub artifact_types: Option<BTreeSet<Type>>,
}

impl Artifacts {
    pub fn new(cache: FileCache) -> Self {
        Self {
            cache,
            classifiers: BTreeSet::new(),
            main_artifacts: None,
            artifact_types: None,
        }
    }
}

/// Outcome of a resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub root_dependencies: Vec<Dependency>,
    /// Conflict-resolved dependencies, dependencies before their dependents
    pub ordered_dependencies: Vec<Dependency>,
}

/// Completion request for a partially typed coordinate
#[derive(Debug, Clone)]
pub struct Complete {
    pub input: String,
    pub scala_version: Option<String>,
    pub scala_binary_version: Option<String>,
    pub repositories: Vec<Repository>,
    pub cache: FileCache,
}

/// Completion candidates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    /// Offset in the input where the completed segment starts
    pub from: usize,
    pub completions: Vec<String>,
}

/// Index mapping JVM identifiers to archive URLs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum JvmIndex {
    #[default]
    Default,
    Url(String),
}

/// The resolution, download and installation engine
pub trait Engine: Send + Sync {
    /// Compute the dependency graph of a request
    fn resolve(&self, request: &Resolve) -> Result<Resolution, ResolutionError>;

    /// Download the artifacts of a resolution
    fn fetch_artifacts(
        &self,
        request: &Artifacts,
        resolution: &Resolution,
    ) -> Result<Vec<(Artifact, Utf8PathBuf)>, FetchError>;

    /// Raw cache files of a resolution, without artifact metadata
    fn fetch_cache_files(
        &self,
        request: &Artifacts,
        resolution: &Resolution,
    ) -> Result<Vec<Utf8PathBuf>, FetchError>;

    /// Download a single artifact
    fn cache_file(&self, cache: &FileCache, artifact: &Artifact) -> Result<Utf8PathBuf, ArtifactError>;

    /// Download and extract an archive
    fn archive_file(
        &self,
        cache: &ArchiveCache,
        artifact: &Artifact,
    ) -> Result<Utf8PathBuf, ArtifactError>;

    /// Extracted archive if already cached; never downloads
    fn archive_file_if_exists(
        &self,
        cache: &ArchiveCache,
        artifact: &Artifact,
    ) -> Result<Option<Utf8PathBuf>, ArtifactError>;

    /// Install (if needed) and locate a JVM
    fn jvm_home(&self, cache: &ArchiveCache, index: &JvmIndex, id: &str) -> EngineResult<Utf8PathBuf>;

    /// Complete a partially typed coordinate
    fn complete(&self, request: &Complete) -> EngineResult<Completion>;

    /// Versions a single repository lists for a module
    fn list_versions(
        &self,
        cache: &FileCache,
        module: &Module,
        repository: &Repository,
    ) -> Result<Versions, String>;
}
