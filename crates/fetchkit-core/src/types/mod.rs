//! Core data types for the resolution engine.
//!
//! This module provides the value types the engine works with:
//! - Module coordinates and the string newtypes they are made of
//! - Dependency specifications with exclusions and overrides
//! - Repositories, authentication and artifacts
//! - Resolution parameters
//! - Version ordering and version listings

pub mod artifact;
pub mod dependency;
pub mod module;
pub mod params;
pub mod repository;
pub mod version;
pub mod versions;

// Re-export all public types
pub use artifact::Artifact;
pub use dependency::{
    Dependency, DependencyManagementKey, DependencyManagementValues, Publication,
};
pub use module::{Classifier, Configuration, Extension, Module, ModuleName, Organization, Type};
pub use params::ResolutionParams;
pub use repository::{Authentication, CustomRepository, IvyRepository, MavenRepository, Repository};
pub use version::Version;
pub use versions::Versions;
