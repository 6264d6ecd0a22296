//! # fetchkit-core
//!
//! Internal domain model of the fetchkit resolution engine.
//!
//! This crate provides:
//! - Module, Dependency, Repository and Artifact types used by the engine
//! - ResolutionParams with the engine's own defaults
//! - The layered `EngineError` hierarchy
//! - FileCache / ArchiveCache handles and the multi-hook `CacheLogger`
//! - The `Engine` trait that resolution, download and JVM management sit behind
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: value types (modules, dependencies, repositories, params, versions)
//! - `parse`: coordinate strings and Ivy patterns
//! - `cache`: cache handles and logger hooks
//! - `engine`: request types and the engine contract
//! - `error`: error types and result aliases

pub mod cache;
pub mod engine;
pub mod error;
pub mod parse;
pub mod types;

// Re-export commonly used types
pub use cache::{ArchiveCache, CacheLogger, FileCache, NoopLogger, Unarchiver};
pub use engine::{Artifacts, Complete, Completion, Engine, JvmIndex, Resolution, Resolve};
pub use error::{
    ArtifactError, EngineError, EngineResult, FetchError, ResolutionError, SimpleResolutionError,
};
pub use types::{
    Artifact, Authentication, Classifier, Configuration, CustomRepository, Dependency,
    DependencyManagementKey, DependencyManagementValues, Extension, IvyRepository,
    MavenRepository, Module, ModuleName, Organization, Publication, Repository,
    ResolutionParams, Type, Version, Versions,
};
