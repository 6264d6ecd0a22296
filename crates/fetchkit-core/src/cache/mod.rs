//! Cache handles and download progress hooks.
//!
//! A `FileCache` bundles the three externally-owned resources an engine call
//! needs: the on-disk location, the thread pool engine tasks run on, and the
//! logger the engine reports progress to. None of them is owned by this
//! crate; cloning a handle shares them.

use std::fmt;
use std::sync::Arc;

use camino::Utf8PathBuf;
use rayon::ThreadPool;

use crate::types::Artifact;

/// Progress hooks the engine invokes while it works
///
/// Every hook defaults to a no-op, so implementations only override what
/// they observe. Hooks are called from whatever pool thread the engine runs
/// on. Times are milliseconds since the Unix epoch.
#[allow(unused_variables)]
pub trait CacheLogger: Send + Sync {
    fn init(&self, size_hint: Option<usize>) {}

    fn stop(&self) {}

    fn found_locally(&self, url: &str) {}

    fn downloading_artifact(&self, url: &str, artifact: &Artifact) {}

    fn download_length(&self, url: &str, total_length: u64, already_downloaded: u64, watching: bool) {}

    fn download_progress(&self, url: &str, downloaded: u64) {}

    fn downloaded_artifact(&self, url: &str, success: bool) {}

    fn getting_length(&self, url: &str) {}

    fn getting_length_result(&self, url: &str, length: Option<u64>) {}

    fn checking_artifact(&self, url: &str, artifact: &Artifact) {}

    fn checking_updates(&self, url: &str, current_time: Option<i64>) {}

    fn checking_updates_result(&self, url: &str, current_time: Option<i64>, remote_time: Option<i64>) {}

    fn picked_module_version(&self, module: &str, version: &str) {}

    fn removed_corrupt_file(&self, url: &str, reason: Option<&str>) {}
}

/// Logger ignoring every hook
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl CacheLogger for NoopLogger {}

/// Handle on the engine's download cache
#[derive(Clone)]
pub struct FileCache {
    pub location: Utf8PathBuf,
    pub pool: Arc<ThreadPool>,
    pub logger: Arc<dyn CacheLogger>,
}

impl FileCache {
    /// Cache without progress reporting
    pub fn new(location: impl Into<Utf8PathBuf>, pool: Arc<ThreadPool>) -> Self {
        Self {
            location: location.into(),
            pool,
            logger: Arc::new(NoopLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn CacheLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Run an engine task on the cache pool, blocking until it completes
    pub fn run<T, F>(&self, task: F) -> T
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        self.pool.install(task)
    }
}

impl fmt::Debug for FileCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileCache")
            .field("location", &self.location)
            .field("pool_threads", &self.pool.current_num_threads())
            .finish_non_exhaustive()
    }
}

/// How archives are unpacked into an archive cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Unarchiver {
    /// The engine's built-in extractor
    #[default]
    Default,
}

/// Cache of extracted archives, backed by a download cache
#[derive(Debug, Clone)]
pub struct ArchiveCache {
    pub location: Utf8PathBuf,
    pub cache: FileCache,
    pub unarchiver: Unarchiver,
}

impl ArchiveCache {
    pub fn new(location: impl Into<Utf8PathBuf>, cache: FileCache) -> Self {
        Self {
            location: location.into(),
            cache,
            unarchiver: Unarchiver::default(),
        }
    }
}
