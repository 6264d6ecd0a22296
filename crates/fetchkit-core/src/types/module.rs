//! Module coordinates and the string newtypes used across the model.

use std::collections::BTreeMap;
use std::fmt;

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_newtype!(
    /// Group a module belongs to (e.g. `org.typelevel`)
    Organization
);
string_newtype!(
    /// Module name within its organization
    ModuleName
);
string_newtype!(
    /// Artifact type (`jar`, `pom`, `bundle`, ...)
    Type
);
string_newtype!(
    /// Artifact classifier (`sources`, `javadoc`, ...)
    Classifier
);
string_newtype!(
    /// File extension of a published artifact
    Extension
);
string_newtype!(
    /// Configuration a dependency is pulled in (`compile`, `test`, ...)
    Configuration
);

impl Type {
    pub fn jar() -> Self {
        Self::new("jar")
    }
}

impl Configuration {
    /// Configuration the engine falls back to when a dependency names none
    pub fn default_runtime() -> Self {
        Self::new("default(runtime)")
    }
}

/// Organization + name + attributes, identifying a family of versions
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Module {
    pub organization: Organization,
    pub name: ModuleName,
    pub attributes: BTreeMap<String, String>,
}

impl Module {
    /// Create a module without attributes
    pub fn new(organization: impl Into<Organization>, name: impl Into<ModuleName>) -> Self {
        Self {
            organization: organization.into(),
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_attributes(mut self, attributes: BTreeMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.organization, self.name)?;
        for (key, value) in &self.attributes {
            write!(f, ";{}={}", key, value)?;
        }
        Ok(())
    }
}
