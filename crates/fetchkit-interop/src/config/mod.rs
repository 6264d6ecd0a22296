//! Cache settings: defaults, environment overrides and explicit overrides
//!
//! Layers apply in order, later ones winning:
//! 1. defaults under the user cache directory (`<cache dir>/fetchkit`)
//! 2. `FETCHKIT_*` environment variables
//! 3. explicit overrides (`cache`, `archive_cache`, `pool_size`)

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use camino::Utf8PathBuf;
use fetchkit_api as api;
use rayon::{ThreadPool, ThreadPoolBuilder};
use thiserror::Error;
use tracing::debug;

/// Prefix of the environment variables read by `CacheConfig::from_env`
pub const ENV_PREFIX: &str = "FETCHKIT_";

/// Download cache location
pub const ENV_CACHE: &str = "FETCHKIT_CACHE";

/// Archive cache location
pub const ENV_ARCHIVE_CACHE: &str = "FETCHKIT_ARCHIVE_CACHE";

/// Number of engine threads
pub const ENV_POOL_SIZE: &str = "FETCHKIT_POOL_SIZE";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the user cache directory")]
    NoCacheDirectory,

    #[error("Configuration validation failed: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("Failed to build the engine thread pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

impl ConfigError {
    fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for configuration
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where caches live and how many threads the engine gets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub cache_location: Utf8PathBuf,
    pub archive_location: Utf8PathBuf,
    pub pool_size: NonZeroUsize,
}

impl CacheConfig {
    /// Caches under `root`, one engine thread per available core
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        let root = root.into();
        Self {
            cache_location: root.join("v1"),
            archive_location: root.join("arc"),
            pool_size: std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        }
    }

    /// Defaults under the user cache directory
    pub fn defaults() -> ConfigResult<Self> {
        let cache_dir = dirs::cache_dir().ok_or(ConfigError::NoCacheDirectory)?;
        let cache_dir = Utf8PathBuf::try_from(cache_dir).map_err(|e| {
            ConfigError::validation("cache_dir", format!("Invalid cache directory path: {}", e))
        })?;
        Ok(Self::new(cache_dir.join("fetchkit")))
    }

    /// Defaults, then environment overrides
    pub fn from_env() -> ConfigResult<Self> {
        Self::defaults()?.with_env_overrides(&Self::collect_env_overrides())
    }

    /// Collect `FETCHKIT_*` environment variables
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect()
    }

    /// Apply environment overrides; unknown `FETCHKIT_*` keys are ignored
    pub fn with_env_overrides(mut self, overrides: &HashMap<String, String>) -> ConfigResult<Self> {
        for (key, value) in overrides {
            match key.as_str() {
                ENV_CACHE => self.cache_location = location(key, value)?,
                ENV_ARCHIVE_CACHE => self.archive_location = location(key, value)?,
                ENV_POOL_SIZE => self.pool_size = pool_size(key, value)?,
                _ => {},
            }
        }
        Ok(self)
    }

    /// Apply explicit overrides, keyed `cache`, `archive_cache` and `pool_size`
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> ConfigResult<Self> {
        for (key, value) in overrides {
            match key.as_str() {
                "cache" => self.cache_location = location(key, value)?,
                "archive_cache" => self.archive_location = location(key, value)?,
                "pool_size" => self.pool_size = pool_size(key, value)?,
                _ => return Err(ConfigError::validation(key, "unknown setting")),
            }
        }
        Ok(self)
    }

    pub fn build_pool(&self) -> ConfigResult<Arc<ThreadPool>> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.pool_size.get())
            .thread_name(|index| format!("fetchkit-{}", index))
            .build()?;
        Ok(Arc::new(pool))
    }

    pub fn cache(&self, pool: Arc<ThreadPool>) -> api::Cache {
        api::Cache::new(pool, self.cache_location.clone().into_std_path_buf())
    }

    pub fn archive_cache(&self, pool: Arc<ThreadPool>) -> api::ArchiveCache {
        api::ArchiveCache::new(self.archive_location.clone().into_std_path_buf(), self.cache(pool))
    }

    /// Download and archive caches sharing one fresh pool
    pub fn build(&self) -> ConfigResult<(api::Cache, api::ArchiveCache)> {
        debug!(
            cache = %self.cache_location,
            archive = %self.archive_location,
            threads = self.pool_size.get(),
            "building caches"
        );
        let pool = self.build_pool()?;
        Ok((self.cache(pool.clone()), self.archive_cache(pool)))
    }
}

fn location(field: &str, value: &str) -> ConfigResult<Utf8PathBuf> {
    if value.trim().is_empty() {
        return Err(ConfigError::validation(field, "empty path"));
    }
    Ok(Utf8PathBuf::from(value))
}

fn pool_size(field: &str, value: &str) -> ConfigResult<NonZeroUsize> {
    value
        .trim()
        .parse::<NonZeroUsize>()
        .map_err(|e| ConfigError::validation(field, format!("Invalid thread count '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_new_lays_out_caches_under_root() {
        let config = CacheConfig::new("/data/fetchkit");
        assert_eq!(config.cache_location, "/data/fetchkit/v1");
        assert_eq!(config.archive_location, "/data/fetchkit/arc");
    }

    #[test]
    fn test_env_overrides() {
        let config = CacheConfig::new("/data/fetchkit")
            .with_env_overrides(&overrides(&[
                (ENV_CACHE, "/mnt/cache"),
                (ENV_POOL_SIZE, "3"),
                ("FETCHKIT_UNRELATED", "ignored"),
            ]))
            .unwrap();

        assert_eq!(config.cache_location, "/mnt/cache");
        assert_eq!(config.archive_location, "/data/fetchkit/arc");
        assert_eq!(config.pool_size.get(), 3);
    }

    #[test]
    fn test_explicit_overrides_win() {
        let config = CacheConfig::new("/data/fetchkit")
            .with_env_overrides(&overrides(&[(ENV_ARCHIVE_CACHE, "/env/arc")]))
            .and_then(|config| config.with_overrides(&overrides(&[("archive_cache", "/cli/arc")])))
            .unwrap();

        assert_eq!(config.archive_location, "/cli/arc");
    }

    #[test]
    fn test_invalid_values() {
        let error = CacheConfig::new("/data")
            .with_env_overrides(&overrides(&[(ENV_POOL_SIZE, "0")]))
            .unwrap_err();
        assert!(matches!(error, ConfigError::Validation { ref field, .. } if field == ENV_POOL_SIZE));

        let error = CacheConfig::new("/data")
            .with_overrides(&overrides(&[("cache", "  ")]))
            .unwrap_err();
        assert!(matches!(error, ConfigError::Validation { .. }));

        let error = CacheConfig::new("/data")
            .with_overrides(&overrides(&[("colour", "blue")]))
            .unwrap_err();
        assert!(error.to_string().contains("colour"));
    }

    #[test]
    fn test_collect_env_overrides() {
        std::env::set_var("FETCHKIT_TEST_MARKER", "1");
        std::env::set_var("NOT_FETCHKIT_TEST_MARKER", "1");

        let collected = CacheConfig::collect_env_overrides();

        assert!(collected.contains_key("FETCHKIT_TEST_MARKER"));
        assert!(!collected.contains_key("NOT_FETCHKIT_TEST_MARKER"));

        std::env::remove_var("FETCHKIT_TEST_MARKER");
        std::env::remove_var("NOT_FETCHKIT_TEST_MARKER");
    }

    #[test]
    fn test_build_shares_one_pool() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let config = CacheConfig::new(root.clone())
            .with_overrides(&overrides(&[("pool_size", "2")]))
            .unwrap();

        let (cache, archive) = config.build().unwrap();

        assert_eq!(cache.pool.current_num_threads(), 2);
        assert!(Arc::ptr_eq(&cache.pool, &archive.cache.pool));
        assert_eq!(cache.location, root.join("v1").into_std_path_buf());
        assert_eq!(archive.location, root.join("arc").into_std_path_buf());
    }
}
