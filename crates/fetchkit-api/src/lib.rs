//! Public object model of fetchkit
//!
//! This crate is what callers program against: modules, dependencies,
//! repositories, caches, resolution parameters, fetch requests and their
//! results, version listings and a flat error taxonomy. It carries no
//! engine types; `fetchkit-interop` translates it to and from the engine
//! model.

pub mod cache;
pub mod error;
pub mod foreign;
pub mod request;
pub mod types;

mod serde_pairs;

// Re-export main types
pub use cache::{ArchiveCache, Cache, CacheLogger, Logger, SimpleLogger};
pub use error::{Error, Result, SimpleResolutionError};
pub use foreign::{Foreign, ForeignValue};
pub use request::{
    Complete, CompleteResult, Fetch, FetchResult, VersionsRequest, VersionsResult,
};
pub use types::{
    Artifact, Credentials, Dependency, DependencyManagementKey, DependencyManagementValues,
    IvyRepository, MavenRepository, Module, Publication, Repository, ResolutionParams,
    Timestamp, VersionListing,
};
