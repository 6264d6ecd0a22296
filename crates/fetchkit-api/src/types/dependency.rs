//! Dependency specifications.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::Module;

/// A module pinned to a version, plus resolution modifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub module: Module,
    pub version: String,
    /// Excluded (organization, name) pairs
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub exclusions: BTreeSet<(String, String)>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub configuration: String,
    #[serde(default = "default_transitive")]
    pub transitive: bool,
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        with = "crate::serde_pairs"
    )]
    pub overrides: BTreeMap<DependencyManagementKey, DependencyManagementValues>,
    /// Artifact to publish under; a publication whose fields are all empty
    /// is the same as `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication: Option<Publication>,
}

fn default_transitive() -> bool {
    true
}

/// Published artifact a dependency points at
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Publication {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub extension: String,
    pub classifier: String,
}

/// Key of a dependency override
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DependencyManagementKey {
    pub organization: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub classifier: String,
}

/// Values a dependency override forces
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DependencyManagementValues {
    pub configuration: String,
    pub version: String,
    #[serde(default)]
    pub exclusions: BTreeSet<(String, String)>,
    #[serde(default)]
    pub optional: bool,
}

impl Dependency {
    pub fn new(module: Module, version: impl Into<String>) -> Self {
        Self {
            module,
            version: version.into(),
            exclusions: BTreeSet::new(),
            configuration: String::new(),
            transitive: true,
            overrides: BTreeMap::new(),
            publication: None,
        }
    }

    pub fn with_exclusion(mut self, organization: impl Into<String>, name: impl Into<String>) -> Self {
        self.exclusions.insert((organization.into(), name.into()));
        self
    }

    /// Replace exclusions; duplicates collapse
    pub fn with_exclusions<I>(mut self, exclusions: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.exclusions = exclusions.into_iter().collect();
        self
    }

    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = configuration.into();
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

    pub fn with_publication(mut self, publication: Option<Publication>) -> Self {
        self.publication = publication;
        self
    }
}

impl Publication {
    pub fn new(
        name: impl Into<String>,
        type_: impl Into<String>,
        extension: impl Into<String>,
        classifier: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_: type_.into(),
            extension: extension.into(),
            classifier: classifier.into(),
        }
    }
}

impl DependencyManagementKey {
    pub fn new(
        organization: impl Into<String>,
        name: impl Into<String>,
        type_: impl Into<String>,
        classifier: impl Into<String>,
    ) -> Self {
        Self {
            organization: organization.into(),
            name: name.into(),
            type_: type_.into(),
            classifier: classifier.into(),
        }
    }
}

impl DependencyManagementValues {
    pub fn new(configuration: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            configuration: configuration.into(),
            version: version.into(),
            exclusions: BTreeSet::new(),
            optional: false,
        }
    }

    pub fn with_exclusion(mut self, organization: impl Into<String>, name: impl Into<String>) -> Self {
        self.exclusions.insert((organization.into(), name.into()));
        self
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_exclusions_collapse() {
        let dep = Dependency::new(Module::new("org", "name"), "1.0").with_exclusions(vec![
            ("A".to_string(), "B".to_string()),
            ("A".to_string(), "B".to_string()),
        ]);

        assert_eq!(dep.exclusions.len(), 1);
    }

    #[test]
    fn test_json_shape() {
        let dep = Dependency::new(Module::new("org", "name"), "1.0")
            .with_exclusion("a", "b")
            .with_override(
                DependencyManagementKey::new("x", "y", "jar", ""),
                DependencyManagementValues::new("", "2.0"),
            );

        let json = serde_json::to_value(&dep).unwrap();
        assert_eq!(json["module"]["organization"], "org");
        assert_eq!(json["exclusions"][0][0], "a");
        assert_eq!(json["overrides"][0][0]["type"], "jar");
        assert_eq!(json["overrides"][0][1]["version"], "2.0");
        assert!(json.get("publication").is_none());

        let back: Dependency = serde_json::from_value(json).unwrap();
        assert_eq!(back, dep);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dep: Dependency = serde_json::from_str(
            r#"{"module":{"organization":"org","name":"name"},"version":"1.0"}"#,
        )
        .unwrap();

        assert!(dep.transitive);
        assert!(dep.exclusions.is_empty());
        assert!(dep.publication.is_none());
    }
}
