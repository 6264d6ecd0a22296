//! Resolution parameters and fetch requests.
//!
//! Public parameters are sparse: a field left unset means "engine default".
//! Going engine → public, fields equal to the engine default are left
//! unset, so a default engine configuration maps to an empty public one.

use fetchkit_api as api;
use fetchkit_core::types::{Classifier, Configuration, ModuleName, Organization, Type};
use fetchkit_core::{Artifacts, Repository, ResolutionParams, Resolve};
use once_cell::sync::Lazy;
use tracing::trace;

use crate::cache::to_internal_cache;
use crate::entity::{to_internal_dependency, to_internal_module, to_internal_repository, to_public_module};

static DEFAULT_PARAMS: Lazy<ResolutionParams> = Lazy::new(ResolutionParams::default);

/// Engine parameters as the sparse public shape
pub fn to_public_params(params: &ResolutionParams) -> api::ResolutionParams {
    let defaults = &*DEFAULT_PARAMS;

    api::ResolutionParams {
        max_iterations: (params.max_iterations != defaults.max_iterations)
            .then_some(params.max_iterations),
        force_versions: params
            .force_versions
            .iter()
            .map(|(module, version)| (to_public_module(module), version.clone()))
            .collect(),
        forced_properties: params.forced_properties.clone(),
        profiles: params.profiles.clone(),
        exclusions: params
            .exclusions
            .iter()
            .map(|(organization, name)| (organization.to_string(), name.to_string()))
            .collect(),
        use_system_os_info: params.use_system_os_info,
        use_system_jdk_version: params.use_system_jdk_version,
        scala_version: params.scala_version.clone(),
        keep_provided_dependencies: params.keep_provided_dependencies,
        force_dep_mgmt_versions: params.force_dep_mgmt_versions,
        enable_dependency_overrides: params.enable_dependency_overrides,
        default_configuration: (params.default_configuration != defaults.default_configuration)
            .then(|| params.default_configuration.to_string()),
    }
}

/// Public parameters applied on top of the engine defaults
pub fn to_internal_params(params: &api::ResolutionParams) -> ResolutionParams {
    let mut internal = DEFAULT_PARAMS.clone();

    if let Some(max_iterations) = params.max_iterations {
        internal.max_iterations = max_iterations;
    }
    internal.force_versions = params
        .force_versions
        .iter()
        .map(|(module, version)| (to_internal_module(module), version.clone()))
        .collect();
    internal.forced_properties = params.forced_properties.clone();
    internal.profiles = params.profiles.clone();
    internal.exclusions = params
        .exclusions
        .iter()
        .map(|(organization, name)| (Organization::new(organization.as_str()), ModuleName::new(name.as_str())))
        .collect();
    internal.use_system_os_info = params.use_system_os_info;
    internal.use_system_jdk_version = params.use_system_jdk_version;
    if let Some(scala_version) = &params.scala_version {
        internal.scala_version = Some(scala_version.clone());
    }
    if params.keep_provided_dependencies.is_some() {
        internal.keep_provided_dependencies = params.keep_provided_dependencies;
    }
    if params.force_dep_mgmt_versions.is_some() {
        internal.force_dep_mgmt_versions = params.force_dep_mgmt_versions;
    }
    if params.enable_dependency_overrides.is_some() {
        internal.enable_dependency_overrides = params.enable_dependency_overrides;
    }
    if let Some(configuration) = &params.default_configuration {
        internal.default_configuration = Configuration::new(configuration.as_str());
    }

    internal
}

/// Repositories of a request; none means the engine defaults
pub fn to_internal_repositories(repositories: &[api::Repository]) -> api::Result<Vec<Repository>> {
    if repositories.is_empty() {
        return Ok(Resolve::default_repositories());
    }
    repositories.iter().map(to_internal_repository).collect()
}

/// Split a public fetch into the engine's resolution and artifact requests
pub fn fetch_requests(fetch: &api::Fetch) -> api::Result<(Resolve, Artifacts)> {
    let cache = to_internal_cache(&fetch.cache)?;
    let repositories = to_internal_repositories(&fetch.repositories)?;

    trace!(
        dependencies = fetch.dependencies.len(),
        bom_dependencies = fetch.bom_dependencies.len(),
        repositories = repositories.len(),
        "building fetch requests"
    );

    let resolve = Resolve::new(cache.clone())
        .with_dependencies(fetch.dependencies.iter().map(to_internal_dependency).collect())
        .with_bom_dependencies(fetch.bom_dependencies.iter().map(to_internal_dependency).collect())
        .with_repositories(repositories)
        .with_params(to_internal_params(&fetch.resolution_params));

    let mut artifacts = Artifacts::new(cache);
    artifacts.classifiers = fetch
        .classifiers
        .iter()
        .map(|classifier| Classifier::new(classifier.as_str()))
        .collect();
    artifacts.main_artifacts = fetch.main_artifacts;
    artifacts.artifact_types = fetch
        .artifact_types
        .as_ref()
        .map(|types| types.iter().map(|type_| Type::new(type_.as_str())).collect());

    Ok((resolve, artifacts))
}
