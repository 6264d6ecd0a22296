//! Resolution parameters.

use std::collections::{BTreeMap, BTreeSet};

use super::{Configuration, Module, ModuleName, Organization};

/// Maximum number of resolution rounds before the engine gives up
pub const DEFAULT_MAX_ITERATIONS: u32 = 200;

/// Knobs of a resolution run
///
/// `ResolutionParams::default()` is the engine's own configuration; every
/// field left at its default means "let the engine decide".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionParams {
    pub max_iterations: u32,
    pub force_versions: BTreeMap<Module, String>,
    pub forced_properties: BTreeMap<String, String>,
    pub profiles: BTreeSet<String>,
    pub scala_version: Option<String>,
    pub force_scala_version: Option<bool>,
    pub typelevel: bool,
    pub exclusions: BTreeSet<(Organization, ModuleName)>,
    pub use_system_os_info: bool,
    pub use_system_jdk_version: bool,
    pub default_configuration: Configuration,
    pub keep_provided_dependencies: Option<bool>,
    pub force_dep_mgmt_versions: Option<bool>,
    pub enable_dependency_overrides: Option<bool>,
}

impl Default for ResolutionParams {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            force_versions: BTreeMap::new(),
            forced_properties: BTreeMap::new(),
            profiles: BTreeSet::new(),
            scala_version: None,
            force_scala_version: None,
            typelevel: false,
            exclusions: BTreeSet::new(),
            use_system_os_info: true,
            use_system_jdk_version: true,
            default_configuration: Configuration::default_runtime(),
            keep_provided_dependencies: None,
            force_dep_mgmt_versions: None,
            enable_dependency_overrides: None,
        }
    }
}

impl ResolutionParams {
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Force a module to a given version, whatever the graph asks for
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

    pub fn with_scala_version(mut self, scala_version: impl Into<String>) -> Self {
        self.scala_version = Some(scala_version.into());
        self
    }

    pub fn with_exclusion(mut self, organization: Organization, name: ModuleName) -> Self {
        self.exclusions.insert((organization, name));
        self
    }

    pub fn with_default_configuration(mut self, configuration: Configuration) -> Self {
        self.default_configuration = configuration;
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
}
