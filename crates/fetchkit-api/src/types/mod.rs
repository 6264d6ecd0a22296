//! Public value types.
//!
//! All of them are plain immutable values with builder-style `with_*`
//! methods, and all except `Repository` serialize with serde.

pub mod artifact;
pub mod dependency;
pub mod module;
pub mod params;
pub mod repository;
pub mod versions;

pub use artifact::Artifact;
pub use dependency::{
    Dependency, DependencyManagementKey, DependencyManagementValues, Publication,
};
pub use module::Module;
pub use params::ResolutionParams;
pub use repository::{Credentials, IvyRepository, MavenRepository, Repository};
pub use versions::{Timestamp, VersionListing};
