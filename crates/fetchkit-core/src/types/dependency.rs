//! Dependency specification types.
//!
//! A dependency pins a module to a version and carries the modifiers the
//! engine applies while resolving it: exclusions, overrides, transitivity
//! and the configuration it is pulled in.

use std::collections::{BTreeMap, BTreeSet};

use super::{Classifier, Configuration, Extension, Module, ModuleName, Organization, Type};

/// Dependency specification
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub module: Module,
    pub version: String,
    pub configuration: Configuration,
    pub minimized_exclusions: BTreeSet<(Organization, ModuleName)>,
    pub publication: Publication,
    pub optional: bool,
    pub transitive: bool,
    pub overrides: BTreeMap<DependencyManagementKey, DependencyManagementValues>,
}

/// Published artifact a dependency points at
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Publication {
    pub name: String,
    pub type_: Type,
    pub ext: Extension,
    pub classifier: Classifier,
}

/// Key of a dependency management entry
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DependencyManagementKey {
    pub organization: Organization,
    pub name: ModuleName,
    pub type_: Type,
    pub classifier: Classifier,
}

/// Values a dependency management entry forces
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DependencyManagementValues {
    pub configuration: Configuration,
    pub version: String,
    pub minimized_exclusions: BTreeSet<(Organization, ModuleName)>,
    pub optional: bool,
}

impl Dependency {
    /// Create a new transitive dependency with no modifiers
    pub fn new(module: Module, version: impl Into<String>) -> Self {
        Self {
            module,
            version: version.into(),
            configuration: Configuration::default(),
            minimized_exclusions: BTreeSet::new(),
            publication: Publication::default(),
            optional: false,
            transitive: true,
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Exclude a module from this dependency's transitive graph
    pub fn with_exclusion(mut self, organization: Organization, name: ModuleName) -> Self {
        self.minimized_exclusions.insert((organization, name));
        self
    }

    pub fn with_publication(mut self, publication: Publication) -> Self {
        self.publication = publication;
        self
    }

    pub fn with_transitive(mut self, transitive: bool) -> Self {
        self.transitive = transitive;
        self
    }

    pub fn with_override(
        mut self,
        key: DependencyManagementKey,
        values: DependencyManagementValues,
    ) -> Self {
        self.overrides.insert(key, values);
        self
    }

    /// Make this dependency optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

impl Publication {
    pub fn new(
        name: impl Into<String>,
        type_: Type,
        ext: Extension,
        classifier: Classifier,
    ) -> Self {
        Self {
            name: name.into(),
            type_,
            ext,
            classifier,
        }
    }

    /// True when no field was set, i.e. the engine picks the publication itself
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.type_.is_empty()
            && self.ext.is_empty()
            && self.classifier.is_empty()
    }
}
