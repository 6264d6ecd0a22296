//! Resolution parameters.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::Module;

/// Knobs of a resolution run
///
/// Every field left unset (or at its default) means "use the engine's own
/// default", and is omitted when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u32>,
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        with = "crate::serde_pairs"
    )]
    pub force_versions: BTreeMap<Module, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub forced_properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub profiles: BTreeSet<String>,
    /// Excluded (organization, name) pairs
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub exclusions: BTreeSet<(String, String)>,
    #[serde(default = "enabled", skip_serializing_if = "is_enabled")]
    pub use_system_os_info: bool,
    #[serde(default = "enabled", skip_serializing_if = "is_enabled")]
    pub use_system_jdk_version: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scala_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_provided_dependencies: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_dep_mgmt_versions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_dependency_overrides: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_configuration: Option<String>,
}

fn enabled() -> bool {
    true
}

fn is_enabled(value: &bool) -> bool {
    *value
}

impl Default for ResolutionParams {
    fn default() -> Self {
        Self {
            max_iterations: None,
            force_versions: BTreeMap::new(),
            forced_properties: BTreeMap::new(),
            profiles: BTreeSet::new(),
            exclusions: BTreeSet::new(),
            use_system_os_info: true,
            use_system_jdk_version: true,
            scala_version: None,
            keep_provided_dependencies: None,
            force_dep_mgmt_versions: None,
            enable_dependency_overrides: None,
            default_configuration: None,
        }
    }
}

impl ResolutionParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn with_force_version(mut self, module: Module, version: impl Into<String>) -> Self {
        self.force_versions.insert(module, version.into());
        self
    }

    pub fn with_forced_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.forced_properties.insert(key.into(), value.into());
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profiles.insert(profile.into());
        self
    }

    pub fn with_exclusion(mut self, organization: impl Into<String>, name: impl Into<String>) -> Self {
        self.exclusions.insert((organization.into(), name.into()));
        self
    }

    pub fn with_use_system_os_info(mut self, use_system_os_info: bool) -> Self {
        self.use_system_os_info = use_system_os_info;
        self
    }

    pub fn with_use_system_jdk_version(mut self, use_system_jdk_version: bool) -> Self {
        self.use_system_jdk_version = use_system_jdk_version;
        self
    }

    pub fn with_scala_version(mut self, scala_version: impl Into<String>) -> Self {
        self.scala_version = Some(scala_version.into());
        self
    }

    pub fn with_keep_provided_dependencies(mut self, keep: Option<bool>) -> Self {
        self.keep_provided_dependencies = keep;
        self
    }

    pub fn with_force_dep_mgmt_versions(mut self, force: Option<bool>) -> Self {
        self.force_dep_mgmt_versions = force;
        self
    }

    pub fn with_enable_dependency_overrides(mut self, enable: Option<bool>) -> Self {
        self.enable_dependency_overrides = enable;
        self
    }

    pub fn with_default_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.default_configuration = Some(configuration.into());
        self
    }
}
