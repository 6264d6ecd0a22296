//! Entity conversions between the public model and the engine model.
//!
//! `to_public_*` functions go engine → public and are total. `to_internal_*`
//! functions go public → engine; those that can meet invalid input
//! (Ivy patterns, foreign handles, timestamps) return `Err(InvalidArgument)`.

use std::any::Any;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use fetchkit_api as api;
use fetchkit_core as engine;
use fetchkit_core::types::{
    Classifier, Configuration, Extension, ModuleName, Organization, Type,
};
use tracing::trace;

/// Engine repository carried through the public model by identity
#[derive(Debug, Clone)]
pub struct ForeignRepository(pub Arc<dyn engine::CustomRepository>);

impl api::ForeignValue for ForeignRepository {
    fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Conversion of an engine value to its public counterpart
pub trait ToPublic {
    type Public;

    fn to_public(&self) -> Self::Public;
}

/// Conversion of a public value to its engine counterpart
pub trait ToInternal {
    type Internal;

    fn to_internal(&self) -> api::Result<Self::Internal>;
}

macro_rules! impl_to_public {
    ($($internal:ty => $public:ty, $convert:ident;)*) => {
        $(
            impl ToPublic for $internal {
                type Public = $public;

                fn to_public(&self) -> $public {
                    $convert(self)
                }
            }
        )*
    };
}

macro_rules! impl_to_internal {
    ($($public:ty => $internal:ty, $convert:ident;)*) => {
        $(
            impl ToInternal for $public {
                type Internal = $internal;

                fn to_internal(&self) -> api::Result<$internal> {
                    Ok($convert(self))
                }
            }
        )*
    };
}

impl_to_public! {
    engine::Module => api::Module, to_public_module;
    engine::Dependency => api::Dependency, to_public_dependency;
    engine::DependencyManagementKey => api::DependencyManagementKey, to_public_override_key;
    engine::DependencyManagementValues => api::DependencyManagementValues, to_public_override_values;
    engine::Authentication => api::Credentials, to_public_credentials;
    engine::Artifact => api::Artifact, to_public_artifact;
    engine::Repository => api::Repository, to_public_repository;
    engine::Versions => api::VersionListing, to_public_versions;
    NaiveDateTime => api::Timestamp, to_public_timestamp;
}

impl_to_internal! {
    api::Module => engine::Module, to_internal_module;
    api::Dependency => engine::Dependency, to_internal_dependency;
    api::DependencyManagementKey => engine::DependencyManagementKey, to_internal_override_key;
    api::DependencyManagementValues => engine::DependencyManagementValues, to_internal_override_values;
    api::Credentials => engine::Authentication, to_internal_authentication;
    api::Artifact => engine::Artifact, to_internal_artifact;
}

impl ToInternal for api::Repository {
    type Internal = engine::Repository;

    fn to_internal(&self) -> api::Result<engine::Repository> {
        to_internal_repository(self)
    }
}

impl ToInternal for api::VersionListing {
    type Internal = engine::Versions;

    fn to_internal(&self) -> api::Result<engine::Versions> {
        to_internal_versions(self)
    }
}

impl ToInternal for api::Timestamp {
    type Internal = NaiveDateTime;

    fn to_internal(&self) -> api::Result<NaiveDateTime> {
        to_internal_timestamp(self)
    }
}

pub fn to_public_module(module: &engine::Module) -> api::Module {
    api::Module {
        organization: module.organization.to_string(),
        name: module.name.to_string(),
        attributes: module.attributes.clone(),
    }
}

pub fn to_internal_module(module: &api::Module) -> engine::Module {
    engine::Module::new(module.organization.as_str(), module.name.as_str())
        .with_attributes(module.attributes.clone())
}

fn to_public_exclusions(exclusions: &BTreeSet<(Organization, ModuleName)>) -> BTreeSet<(String, String)> {
    exclusions
        .iter()
        .map(|(organization, name)| (organization.to_string(), name.to_string()))
        .collect()
}

fn to_internal_exclusions(exclusions: &BTreeSet<(String, String)>) -> BTreeSet<(Organization, ModuleName)> {
    exclusions
        .iter()
        .map(|(organization, name)| (Organization::new(organization.as_str()), ModuleName::new(name.as_str())))
        .collect()
}

/// Empty engine publications have no public counterpart
pub fn to_public_publication(publication: &engine::Publication) -> Option<api::Publication> {
    if publication.is_empty() {
        return None;
    }
    Some(api::Publication {
        name: publication.name.clone(),
        type_: publication.type_.to_string(),
        extension: publication.ext.to_string(),
        classifier: publication.classifier.to_string(),
    })
}

pub fn to_internal_publication(publication: Option<&api::Publication>) -> engine::Publication {
    match publication {
        Some(publication) => engine::Publication::new(
            publication.name.as_str(),
            Type::new(publication.type_.as_str()),
            Extension::new(publication.extension.as_str()),
            Classifier::new(publication.classifier.as_str()),
        ),
        None => engine::Publication::default(),
    }
}

pub fn to_public_override_key(key: &engine::DependencyManagementKey) -> api::DependencyManagementKey {
    api::DependencyManagementKey {
        organization: key.organization.to_string(),
        name: key.name.to_string(),
        type_: key.type_.to_string(),
        classifier: key.classifier.to_string(),
    }
}

pub fn to_internal_override_key(key: &api::DependencyManagementKey) -> engine::DependencyManagementKey {
    engine::DependencyManagementKey {
        organization: Organization::new(key.organization.as_str()),
        name: ModuleName::new(key.name.as_str()),
        type_: Type::new(key.type_.as_str()),
        classifier: Classifier::new(key.classifier.as_str()),
    }
}

pub fn to_public_override_values(
    values: &engine::DependencyManagementValues,
) -> api::DependencyManagementValues {
    api::DependencyManagementValues {
        configuration: values.configuration.to_string(),
        version: values.version.clone(),
        exclusions: to_public_exclusions(&values.minimized_exclusions),
        optional: values.optional,
    }
}

pub fn to_internal_override_values(
    values: &api::DependencyManagementValues,
) -> engine::DependencyManagementValues {
    engine::DependencyManagementValues {
        configuration: Configuration::new(values.configuration.as_str()),
        version: values.version.clone(),
        minimized_exclusions: to_internal_exclusions(&values.exclusions),
        optional: values.optional,
    }
}

/// Engine-only dependency fields (`optional`) are not carried over
pub fn to_public_dependency(dependency: &engine::Dependency) -> api::Dependency {
    api::Dependency {
        module: to_public_module(&dependency.module),
        version: dependency.version.clone(),
        exclusions: to_public_exclusions(&dependency.minimized_exclusions),
        configuration: dependency.configuration.to_string(),
        transitive: dependency.transitive,
        overrides: dependency
            .overrides
            .iter()
            .map(|(key, values)| (to_public_override_key(key), to_public_override_values(values)))
            .collect(),
        publication: to_public_publication(&dependency.publication),
    }
}

pub fn to_internal_dependency(dependency: &api::Dependency) -> engine::Dependency {
    let mut internal = engine::Dependency::new(to_internal_module(&dependency.module), dependency.version.as_str())
        .with_configuration(Configuration::new(dependency.configuration.as_str()))
        .with_publication(to_internal_publication(dependency.publication.as_ref()))
        .with_transitive(dependency.transitive);
    internal.minimized_exclusions = to_internal_exclusions(&dependency.exclusions);
    internal.overrides = dependency
        .overrides
        .iter()
        .map(|(key, values)| (to_internal_override_key(key), to_internal_override_values(values)))
        .collect();
    internal
}

/// A missing engine password becomes the empty-string sentinel
pub fn to_public_credentials(authentication: &engine::Authentication) -> api::Credentials {
    api::Credentials {
        user: authentication.user.clone(),
        password: authentication.password.clone().unwrap_or_default(),
    }
}

/// The public password is always present, even when empty
pub fn to_internal_authentication(credentials: &api::Credentials) -> engine::Authentication {
    engine::Authentication::new(credentials.user.as_str(), credentials.password.as_str())
}

pub fn to_public_artifact(artifact: &engine::Artifact) -> api::Artifact {
    api::Artifact {
        url: artifact.url.clone(),
        changing: artifact.changing,
        optional: artifact.optional,
        credentials: artifact.authentication.as_ref().map(to_public_credentials),
    }
}

pub fn to_internal_artifact(artifact: &api::Artifact) -> engine::Artifact {
    engine::Artifact {
        url: artifact.url.clone(),
        checksum_urls: Default::default(),
        changing: artifact.changing,
        optional: artifact.optional,
        authentication: artifact.credentials.as_ref().map(to_internal_authentication),
    }
}

pub fn to_public_repository(repository: &engine::Repository) -> api::Repository {
    match repository {
        engine::Repository::Maven(maven) => api::Repository::Maven(api::MavenRepository {
            root: maven.root.clone(),
            credentials: maven.authentication.as_ref().map(to_public_credentials),
        }),
        engine::Repository::Ivy(ivy) => api::Repository::Ivy(api::IvyRepository {
            pattern: ivy.pattern.to_string(),
            metadata_pattern: ivy.metadata_pattern.as_ref().map(|pattern| pattern.to_string()),
            drop_info_attributes: ivy.drop_info_attributes,
            credentials: ivy.authentication.as_ref().map(to_public_credentials),
        }),
        engine::Repository::Custom(custom) => {
            api::Repository::Opaque(api::Foreign::new(ForeignRepository(custom.clone())))
        },
    }
}

pub fn to_internal_repository(repository: &api::Repository) -> api::Result<engine::Repository> {
    match repository {
        api::Repository::Maven(maven) => Ok(engine::Repository::Maven(engine::MavenRepository {
            root: maven.root.clone(),
            authentication: maven.credentials.as_ref().map(to_internal_authentication),
            changing: None,
        })),
        api::Repository::Ivy(ivy) => {
            let internal = parse_ivy_repository(
                &ivy.pattern,
                ivy.metadata_pattern.as_deref(),
                ivy.credentials.as_ref(),
                ivy.drop_info_attributes,
            )?;
            Ok(engine::Repository::Ivy(internal))
        },
        api::Repository::Opaque(handle) => match handle.downcast_ref::<ForeignRepository>() {
            Some(ForeignRepository(custom)) => Ok(engine::Repository::Custom(custom.clone())),
            None => Err(api::Error::invalid_argument(format!(
                "Unrecognized opaque repository {:?}",
                handle
            ))),
        },
    }
}

fn parse_ivy_repository(
    pattern: &str,
    metadata_pattern: Option<&str>,
    credentials: Option<&api::Credentials>,
    drop_info_attributes: bool,
) -> api::Result<engine::IvyRepository> {
    engine::IvyRepository::parse(
        pattern,
        metadata_pattern,
        credentials.map(to_internal_authentication),
        drop_info_attributes,
    )
    .map_err(|err| {
        let description = match metadata_pattern {
            Some(metadata_pattern) => format!("{} (metadata pattern {})", pattern, metadata_pattern),
            None => pattern.to_string(),
        };
        api::Error::invalid_argument(format!("Invalid Ivy repository {}: {}", description, err))
    })
}

/// Check an Ivy repository definition without converting it
pub fn validate_ivy_repository(
    pattern: &str,
    metadata_pattern: Option<&str>,
    credentials: Option<&api::Credentials>,
    drop_info_attributes: bool,
) -> api::Result<()> {
    parse_ivy_repository(pattern, metadata_pattern, credentials, drop_info_attributes).map(|_| ())
}

/// Parse `org:name` / `org::name`, the latter cross-versioned for `scala_version`
pub fn parse_module(input: &str, scala_version: &str) -> api::Result<api::Module> {
    trace!(input, scala_version, "parsing module");
    engine::parse::parse_module(input, scala_version)
        .map(|module| to_public_module(&module))
        .map_err(|err| api::Error::invalid_argument(err.to_string()))
}

/// Parse `org:name:version[:configuration]`
pub fn parse_dependency(input: &str, scala_version: &str) -> api::Result<api::Dependency> {
    trace!(input, scala_version, "parsing dependency");
    engine::parse::parse_dependency(input, scala_version)
        .map(|dependency| to_public_dependency(&dependency))
        .map_err(|err| api::Error::invalid_argument(err.to_string()))
}

pub fn to_public_timestamp(timestamp: &NaiveDateTime) -> api::Timestamp {
    api::Timestamp {
        year: timestamp.year(),
        month: timestamp.month(),
        day: timestamp.day(),
        hour: timestamp.hour(),
        minute: timestamp.minute(),
        second: timestamp.second(),
    }
}

pub fn to_internal_timestamp(timestamp: &api::Timestamp) -> api::Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(timestamp.year, timestamp.month, timestamp.day)
        .and_then(|date| date.and_hms_opt(timestamp.hour, timestamp.minute, timestamp.second))
        .ok_or_else(|| api::Error::invalid_argument(format!("Invalid timestamp {}", DisplayTimestamp(timestamp))))
}

struct DisplayTimestamp<'a>(&'a api::Timestamp);

impl fmt::Display for DisplayTimestamp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.0;
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            t.year, t.month, t.day, t.hour, t.minute, t.second
        )
    }
}

pub fn to_public_versions(versions: &engine::Versions) -> api::VersionListing {
    api::VersionListing {
        latest: versions.latest.clone(),
        release: versions.release.clone(),
        available: versions.available.clone(),
        last_updated: versions.last_updated.as_ref().map(to_public_timestamp),
    }
}

pub fn to_internal_versions(listing: &api::VersionListing) -> api::Result<engine::Versions> {
    let last_updated = listing.last_updated.as_ref().map(to_internal_timestamp).transpose()?;
    Ok(engine::Versions::new(
        listing.latest.as_str(),
        listing.release.as_str(),
        listing.available.clone(),
        last_updated,
    ))
}
