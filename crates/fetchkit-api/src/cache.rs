//! Public cache handles and progress loggers.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use rayon::ThreadPool;

use crate::foreign::Foreign;
use crate::types::Artifact;

/// Four-hook download progress logger
pub trait SimpleLogger: Send + Sync {
    /// A download started
    fn start(&self, url: &str);

    /// Total length of a download became known
    fn length(&self, url: &str, total_length: u64, already_downloaded: u64, watching: bool);

    fn progress(&self, url: &str, downloaded: u64);

    /// A download finished, successfully or not
    fn done(&self, url: &str, success: bool);
}

/// Full progress logger; every hook defaults to a no-op
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

    fn checking_updates(&self, url: &str, current_time: Option<SystemTime>) {}

    fn checking_updates_result(
        &self,
        url: &str,
        current_time: Option<SystemTime>,
        remote_time: Option<SystemTime>,
    ) {
    }

    fn picked_module_version(&self, module: &str, version: &str) {}

    fn removed_corrupt_file(&self, url: &str, reason: Option<&str>) {}
}

/// The logger shapes a cache accepts
#[derive(Clone)]
pub enum Logger {
    Simple(Arc<dyn SimpleLogger>),
    /// Engine logger handed out by a previous conversion
    Wrapped(Foreign),
    Full(Arc<dyn CacheLogger>),
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Logger::Simple(_) => f.write_str("Logger::Simple"),
            Logger::Wrapped(handle) => f.debug_tuple("Logger::Wrapped").field(handle).finish(),
            Logger::Full(_) => f.write_str("Logger::Full"),
        }
    }
}

/// Download cache
///
/// The pool is owned by the caller; every engine call made with this cache
/// runs on it.
#[derive(Clone)]
pub struct Cache {
    pub pool: Arc<ThreadPool>,
    pub location: PathBuf,
    pub logger: Option<Logger>,
}

impl Cache {
    pub fn new(pool: Arc<ThreadPool>, location: impl Into<PathBuf>) -> Self {
        Self {
            pool,
            location: location.into(),
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_simple_logger(self, logger: Arc<dyn SimpleLogger>) -> Self {
        self.with_logger(Logger::Simple(logger))
    }
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("location", &self.location)
            .field("logger", &self.logger)
            .finish_non_exhaustive()
    }
}

/// Cache of extracted archives
#[derive(Debug, Clone)]
pub struct ArchiveCache {
    pub location: PathBuf,
    pub cache: Cache,
}

impl ArchiveCache {
    pub fn new(location: impl Into<PathBuf>, cache: Cache) -> Self {
        Self {
            location: location.into(),
            cache,
        }
    }
}
