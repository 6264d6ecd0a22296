//! Translation layer between the fetchkit public model and the engine
//!
//! `fetchkit-api` types are converted to `fetchkit-core` types, handed to an
//! [`Engine`](fetchkit_core::Engine), and the outcome converted back:
//!
//! - `entity`: modules, dependencies, repositories, credentials, artifacts,
//!   version listings
//! - `params`: resolution parameters and fetch requests
//! - `cache`: caches and logger adaptation
//! - `error`: engine errors to the public error taxonomy
//! - `facade`: the public operations
//! - `config`: default cache settings and environment overrides

pub mod cache;
pub mod config;
pub mod entity;
pub mod error;
pub mod facade;
pub mod params;

// Re-export main types
pub use config::{CacheConfig, ConfigError};
pub use entity::{parse_dependency, parse_module, validate_ivy_repository};
pub use facade::{compare_versions, Bridge};
