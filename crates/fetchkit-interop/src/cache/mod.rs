//! Cache conversion and logger adaptation.
//!
//! Public loggers come in three shapes. `Simple` observes four download
//! hooks, `Full` mirrors every engine hook, and `Wrapped` carries an engine
//! logger that was handed out earlier. Engine → public always produces
//! `Wrapped`; unwrapping returns the original engine logger, so converting
//! back and forth never stacks adapters.

use std::any::Any;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use camino::Utf8PathBuf;
use fetchkit_api as api;
use fetchkit_core::{ArchiveCache, Artifact, CacheLogger, FileCache, NoopLogger};

use crate::entity::to_public_artifact;

/// Feeds the four download hooks of a simple logger
pub struct SimpleLoggerAdapter {
    inner: Arc<dyn api::SimpleLogger>,
}

impl SimpleLoggerAdapter {
    pub fn new(inner: Arc<dyn api::SimpleLogger>) -> Self {
        Self { inner }
    }
}

impl CacheLogger for SimpleLoggerAdapter {
    fn downloading_artifact(&self, url: &str, _artifact: &Artifact) {
        self.inner.start(url);
    }

    fn download_length(&self, url: &str, total_length: u64, already_downloaded: u64, watching: bool) {
        self.inner.length(url, total_length, already_downloaded, watching);
    }

    fn download_progress(&self, url: &str, downloaded: u64) {
        self.inner.progress(url, downloaded);
    }

    fn downloaded_artifact(&self, url: &str, success: bool) {
        self.inner.done(url, success);
    }
}

/// Forwards every engine hook to a public multi-hook logger
pub struct FullLoggerAdapter {
    inner: Arc<dyn api::CacheLogger>,
}

impl FullLoggerAdapter {
    pub fn new(inner: Arc<dyn api::CacheLogger>) -> Self {
        Self { inner }
    }
}

impl CacheLogger for FullLoggerAdapter {
    fn init(&self, size_hint: Option<usize>) {
        self.inner.init(size_hint);
    }

    fn stop(&self) {
        self.inner.stop();
    }

    fn found_locally(&self, url: &str) {
        self.inner.found_locally(url);
    }

    fn downloading_artifact(&self, url: &str, artifact: &Artifact) {
        self.inner.downloading_artifact(url, &to_public_artifact(artifact));
    }

    fn download_length(&self, url: &str, total_length: u64, already_downloaded: u64, watching: bool) {
        self.inner.download_length(url, total_length, already_downloaded, watching);
    }

    fn download_progress(&self, url: &str, downloaded: u64) {
        self.inner.download_progress(url, downloaded);
    }

    fn downloaded_artifact(&self, url: &str, success: bool) {
        self.inner.downloaded_artifact(url, success);
    }

    fn getting_length(&self, url: &str) {
        self.inner.getting_length(url);
    }

    fn getting_length_result(&self, url: &str, length: Option<u64>) {
        self.inner.getting_length_result(url, length);
    }

    fn checking_artifact(&self, url: &str, artifact: &Artifact) {
        self.inner.checking_artifact(url, &to_public_artifact(artifact));
    }

    fn checking_updates(&self, url: &str, current_time: Option<i64>) {
        self.inner.checking_updates(url, current_time.and_then(system_time));
    }

    fn checking_updates_result(&self, url: &str, current_time: Option<i64>, remote_time: Option<i64>) {
        self.inner.checking_updates_result(
            url,
            current_time.and_then(system_time),
            remote_time.and_then(system_time),
        );
    }

    fn picked_module_version(&self, module: &str, version: &str) {
        self.inner.picked_module_version(module, version);
    }

    fn removed_corrupt_file(&self, url: &str, reason: Option<&str>) {
        self.inner.removed_corrupt_file(url, reason);
    }
}

/// Milliseconds since the Unix epoch; `None` when out of range
fn system_time(millis: i64) -> Option<SystemTime> {
    let offset = Duration::from_millis(millis.unsigned_abs());
    if millis >= 0 {
        UNIX_EPOCH.checked_add(offset)
    } else {
        UNIX_EPOCH.checked_sub(offset)
    }
}

/// Engine logger carried through the public model by identity
#[derive(Clone)]
pub struct ForeignLogger(pub Arc<dyn CacheLogger>);

impl fmt::Debug for ForeignLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ForeignLogger({:#x})", api::ForeignValue::identity(self))
    }
}

impl api::ForeignValue for ForeignLogger {
    fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Engine logger for an optional public logger
pub fn to_internal_logger(logger: Option<&api::Logger>) -> api::Result<Arc<dyn CacheLogger>> {
    match logger {
        None => Ok(Arc::new(NoopLogger)),
        Some(api::Logger::Simple(simple)) => Ok(Arc::new(SimpleLoggerAdapter::new(simple.clone()))),
        Some(api::Logger::Full(full)) => Ok(Arc::new(FullLoggerAdapter::new(full.clone()))),
        Some(api::Logger::Wrapped(handle)) => match handle.downcast_ref::<ForeignLogger>() {
            Some(ForeignLogger(inner)) => Ok(inner.clone()),
            None => Err(api::Error::invalid_argument(format!(
                "Unrecognized wrapped logger {:?}",
                handle
            ))),
        },
    }
}

pub fn to_public_logger(logger: &Arc<dyn CacheLogger>) -> api::Logger {
    api::Logger::Wrapped(api::Foreign::new(ForeignLogger(logger.clone())))
}

fn utf8_location(location: &Path) -> api::Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(location.to_path_buf()).map_err(|location| {
        api::Error::invalid_argument(format!(
            "Cache location {} is not valid UTF-8",
            location.display()
        ))
    })
}

pub fn to_internal_cache(cache: &api::Cache) -> api::Result<FileCache> {
    let location = utf8_location(&cache.location)?;
    let logger = to_internal_logger(cache.logger.as_ref())?;

    Ok(FileCache::new(location, cache.pool.clone()).with_logger(logger))
}

pub fn to_public_cache(cache: &FileCache) -> api::Cache {
    api::Cache::new(cache.pool.clone(), cache.location.clone().into_std_path_buf())
        .with_logger(to_public_logger(&cache.logger))
}

pub fn to_internal_archive_cache(cache: &api::ArchiveCache) -> api::Result<ArchiveCache> {
    let location = utf8_location(&cache.location)?;
    Ok(ArchiveCache::new(location, to_internal_cache(&cache.cache)?))
}

pub fn to_public_archive_cache(cache: &ArchiveCache) -> api::ArchiveCache {
    api::ArchiveCache::new(
        cache.location.clone().into_std_path_buf(),
        to_public_cache(&cache.cache),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLogger {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingLogger {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl api::SimpleLogger for RecordingLogger {
        fn start(&self, url: &str) {
            self.record(format!("start {}", url));
        }

        fn length(&self, url: &str, total_length: u64, already_downloaded: u64, watching: bool) {
            self.record(format!("length {} {} {} {}", url, total_length, already_downloaded, watching));
        }

        fn progress(&self, url: &str, downloaded: u64) {
            self.record(format!("progress {} {}", url, downloaded));
        }

        fn done(&self, url: &str, success: bool) {
            self.record(format!("done {} {}", url, success));
        }
    }

    impl api::CacheLogger for RecordingLogger {
        fn downloading_artifact(&self, url: &str, artifact: &api::Artifact) {
            self.record(format!("downloading {} changing={}", url, artifact.changing));
        }

        fn checking_updates_result(
            &self,
            url: &str,
            current_time: Option<SystemTime>,
            remote_time: Option<SystemTime>,
        ) {
            let millis = |time: Option<SystemTime>| {
                time.and_then(|time| time.duration_since(UNIX_EPOCH).ok())
                    .map(|duration| duration.as_millis())
            };
            self.record(format!(
                "checked {} {:?} {:?}",
                url,
                millis(current_time),
                millis(remote_time)
            ));
        }
    }

    fn pool() -> Arc<rayon::ThreadPool> {
        Arc::new(rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap())
    }

    fn drive_every_hook(logger: &dyn CacheLogger) {
        let artifact = Artifact::new("u").with_changing(true);
        logger.init(Some(1));
        logger.found_locally("u");
        logger.checking_artifact("u", &artifact);
        logger.downloading_artifact("u", &artifact);
        logger.getting_length("u");
        logger.getting_length_result("u", Some(10));
        logger.download_length("u", 10, 0, false);
        logger.download_progress("u", 5);
        logger.checking_updates("u", Some(0));
        logger.checking_updates_result("u", Some(1_000), None);
        logger.picked_module_version("org:name", "1.0");
        logger.removed_corrupt_file("u", Some("bad checksum"));
        logger.downloaded_artifact("u", true);
        logger.stop();
    }

    #[test]
    fn test_simple_logger_sees_four_hooks() {
        let recording = Arc::new(RecordingLogger::default());
        let public = api::Logger::Simple(recording.clone());

        let logger = to_internal_logger(Some(&public)).unwrap();
        drive_every_hook(logger.as_ref());

        assert_eq!(
            recording.calls(),
            vec![
                "start u".to_string(),
                "length u 10 0 false".to_string(),
                "progress u 5".to_string(),
                "done u true".to_string(),
            ]
        );
    }

    #[test]
    fn test_full_logger_converts_artifacts_and_times() {
        let recording = Arc::new(RecordingLogger::default());
        let public = api::Logger::Full(recording.clone());

        let logger = to_internal_logger(Some(&public)).unwrap();
        drive_every_hook(logger.as_ref());

        assert_eq!(
            recording.calls(),
            vec![
                "downloading u changing=true".to_string(),
                "checked u Some(1000) None".to_string(),
            ]
        );
    }

    #[test]
    fn test_wrapped_logger_unwraps_to_same_logger() {
        let engine_logger: Arc<dyn CacheLogger> = Arc::new(NoopLogger);

        let public = to_public_logger(&engine_logger);
        let back = to_internal_logger(Some(&public)).unwrap();

        assert!(Arc::ptr_eq(&back, &engine_logger));
    }

    #[test]
    fn test_cache_round_trip() {
        let pool = pool();
        let public = api::Cache::new(pool.clone(), "/var/cache/fetchkit");

        let internal = to_internal_cache(&public).unwrap();
        assert_eq!(internal.location.as_str(), "/var/cache/fetchkit");
        assert!(Arc::ptr_eq(&internal.pool, &pool));

        let back = to_public_cache(&internal);
        assert_eq!(back.location, public.location);
        assert!(Arc::ptr_eq(&back.pool, &pool));
        assert!(matches!(back.logger, Some(api::Logger::Wrapped(_))));

        let again = to_internal_cache(&back).unwrap();
        assert!(Arc::ptr_eq(&again.logger, &internal.logger));
    }

    #[test]
    fn test_archive_cache_round_trip() {
        let public = api::ArchiveCache::new("/var/cache/arc", api::Cache::new(pool(), "/var/cache/v1"));

        let internal = to_internal_archive_cache(&public).unwrap();
        assert_eq!(internal.location.as_str(), "/var/cache/arc");
        assert_eq!(internal.cache.location.as_str(), "/var/cache/v1");

        let back = to_public_archive_cache(&internal);
        assert_eq!(back.location, public.location);
        assert_eq!(back.cache.location, public.cache.location);
    }

    #[test]
    fn test_negative_epoch_millis() {
        assert_eq!(system_time(-1_000), UNIX_EPOCH.checked_sub(Duration::from_secs(1)));
        assert_eq!(system_time(0), Some(UNIX_EPOCH));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_location_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        use std::path::PathBuf;

        let location = PathBuf::from(OsStr::from_bytes(b"/tmp/\xff"));
        let error = to_internal_cache(&api::Cache::new(pool(), location)).unwrap_err();
        assert!(matches!(error, api::Error::InvalidArgument { .. }));
    }
}
