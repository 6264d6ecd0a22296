use super::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use fetchkit_core::{
    ArchiveCache, ArtifactError, Artifacts, Completion, CustomRepository, Dependency, FetchError,
    FileCache, Module, Repository, ResolutionError, Resolve, SimpleResolutionError,
};

/// Engine serving canned answers and recording what it was asked
#[derive(Default)]
struct FakeEngine {
    resolution: Resolution,
    resolution_error: Option<ResolutionError>,
    artifacts: Vec<(Artifact, Utf8PathBuf)>,
    fetch_error: Option<FetchError>,
    cache_files: Vec<Utf8PathBuf>,
    /// Listings by repository description
    listings: HashMap<String, Result<Versions, String>>,
    /// Cached files by URL
    files: HashMap<String, Utf8PathBuf>,
    /// Failure of archive lookups, when set
    archive_error: Option<ArtifactError>,
    calls: Mutex<Vec<String>>,
    last_resolve: Mutex<Option<Resolve>>,
}

impl FakeEngine {
    fn record(&self, call: impl Into<String>) {
        let on_pool = rayon::current_thread_index().is_some();
        let call = call.into();
        self.calls
            .lock()
            .unwrap()
            .push(if on_pool { call } else { format!("{} (off pool)", call) });
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn last_resolve(&self) -> Resolve {
        self.last_resolve.lock().unwrap().clone().unwrap()
    }

    fn file(&self, artifact: &Artifact) -> Result<Utf8PathBuf, ArtifactError> {
        self.files
            .get(&artifact.url)
            .cloned()
            .ok_or_else(|| ArtifactError::NotFound {
                url: artifact.url.clone(),
            })
    }
}

impl Engine for FakeEngine {
    fn resolve(&self, request: &Resolve) -> Result<Resolution, ResolutionError> {
        self.record("resolve");
        *self.last_resolve.lock().unwrap() = Some(request.clone());
        match &self.resolution_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.resolution.clone()),
        }
    }

    fn fetch_artifacts(
        &self,
        request: &Artifacts,
        _resolution: &Resolution,
    ) -> Result<Vec<(Artifact, Utf8PathBuf)>, FetchError> {
        self.record("fetch_artifacts");
        if let Some(error) = &self.fetch_error {
            return Err(error.clone());
        }
        for (artifact, _) in &self.artifacts {
            let logger = &request.cache.logger;
            logger.downloading_artifact(&artifact.url, artifact);
            logger.download_length(&artifact.url, 100, 0, false);
            logger.download_progress(&artifact.url, 100);
            logger.downloaded_artifact(&artifact.url, true);
        }
        Ok(self.artifacts.clone())
    }

    fn fetch_cache_files(
        &self,
        _request: &Artifacts,
        _resolution: &Resolution,
    ) -> Result<Vec<Utf8PathBuf>, FetchError> {
        self.record("fetch_cache_files");
        Ok(self.cache_files.clone())
    }

    fn cache_file(&self, _cache: &FileCache, artifact: &Artifact) -> Result<Utf8PathBuf, ArtifactError> {
        self.record(format!("cache_file {}", artifact.url));
        self.file(artifact)
    }

    fn archive_file(
        &self,
        cache: &ArchiveCache,
        artifact: &Artifact,
    ) -> Result<Utf8PathBuf, ArtifactError> {
        self.record(format!("archive_file {}", artifact.url));
        self.file(artifact).map(|file| cache.location.join(file))
    }

    fn archive_file_if_exists(
        &self,
        cache: &ArchiveCache,
        artifact: &Artifact,
    ) -> Result<Option<Utf8PathBuf>, ArtifactError> {
        self.record(format!("archive_file_if_exists {}", artifact.url));
        if let Some(error) = &self.archive_error {
            return Err(error.clone());
        }
        Ok(self.file(artifact).ok().map(|file| cache.location.join(file)))
    }

    fn jvm_home(&self, cache: &ArchiveCache, index: &JvmIndex, id: &str) -> EngineResult<Utf8PathBuf> {
        self.record(format!("jvm_home {:?} {}", index, id));
        match id {
            "temurin:17" => Ok(cache.location.join("jvm/temurin-17")),
            _ => Err(EngineError::message(format!("No JVM found for {}", id))),
        }
    }

    fn complete(&self, request: &Complete) -> EngineResult<Completion> {
        self.record(format!("complete {}", request.input));
        Ok(Completion {
            from: request.input.rfind(':').map(|index| index + 1).unwrap_or(0),
            completions: vec!["cats-core".to_string(), "cats-kernel".to_string()],
        })
    }

    fn list_versions(
        &self,
        _cache: &FileCache,
        module: &Module,
        repository: &Repository,
    ) -> Result<Versions, String> {
        self.record(format!("list_versions {} {}", module, repository.describe()));
        self.listings
            .get(&repository.describe())
            .cloned()
            .unwrap_or_else(|| Err(format!("no listing in {}", repository.describe())))
    }
}

fn cache() -> api::Cache {
    let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
    api::Cache::new(Arc::new(pool), "/var/cache/fetchkit")
}

fn archive_cache() -> api::ArchiveCache {
    api::ArchiveCache::new("/var/cache/fetchkit-arc", cache())
}

fn dependency(name: &str, version: &str) -> Dependency {
    Dependency::new(Module::new("org", name), version)
}

#[test]
fn test_fetch_returns_artifacts_and_dependencies() {
    let engine = FakeEngine {
        resolution: Resolution {
            root_dependencies: vec![dependency("app", "1.0")],
            ordered_dependencies: vec![dependency("lib", "2.0"), dependency("app", "1.0")],
        },
        artifacts: vec![
            (Artifact::new("https://repo/lib-2.0.jar"), "/cache/lib-2.0.jar".into()),
            (Artifact::new("https://repo/app-1.0.jar").with_changing(true), "/cache/app-1.0.jar".into()),
        ],
        ..FakeEngine::default()
    };
    let bridge = Bridge::new(engine);

    let request = api::Fetch::new(cache())
        .add_dependency(api::Dependency::new(api::Module::new("org", "app"), "1.0"));
    let result = bridge.fetch(&request).unwrap();

    assert_eq!(bridge.engine().calls(), vec!["resolve", "fetch_artifacts"]);
    assert_eq!(result.artifacts.len(), 2);
    assert_eq!(result.artifacts[1].0, api::Artifact::new("https://repo/app-1.0.jar").with_changing(true));
    assert_eq!(result.artifacts[1].1, PathBuf::from("/cache/app-1.0.jar"));
    let names: Vec<_> = result.dependencies.iter().map(|dep| dep.module.name.as_str()).collect();
    assert_eq!(names, vec!["lib", "app"]);
}

#[test]
fn test_fetch_download_failure_is_returned() {
    let engine = FakeEngine {
        fetch_error: Some(FetchError::DownloadingArtifacts {
            errors: vec![
                (
                    Artifact::new("u1"),
                    ArtifactError::NotAccessible {
                        url: "u1".to_string(),
                        message: "404".to_string(),
                    },
                ),
                (
                    Artifact::new("u2"),
                    ArtifactError::DownloadError {
                        reason: "timeout".to_string(),
                    },
                ),
            ],
        }),
        ..FakeEngine::default()
    };
    let bridge = Bridge::new(engine);

    let error = bridge.fetch(&api::Fetch::new(cache())).unwrap_err();

    match error {
        api::Error::DownloadingArtifacts { failures, .. } => {
            assert_eq!(failures.len(), 2);
            assert!(failures["u1"].contains("404"));
            assert!(failures["u2"].contains("timeout"));
        },
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_fetch_resolution_failure_skips_download() {
    let engine = FakeEngine {
        resolution_error: Some(ResolutionError::Simple(
            SimpleResolutionError::MaximumIterationReached { max_iterations: 3 },
        )),
        ..FakeEngine::default()
    };
    let bridge = Bridge::new(engine);

    let error = bridge.fetch(&api::Fetch::new(cache())).unwrap_err();

    assert!(matches!(error, api::Error::SimpleResolution(_)));
    assert_eq!(bridge.engine().calls(), vec!["resolve"]);
}

#[test]
fn test_fetch_cache_files_use_placeholder_artifacts() {
    let engine = FakeEngine {
        cache_files: vec!["/cache/a.jar".into(), "/cache/b.pom".into()],
        ..FakeEngine::default()
    };
    let bridge = Bridge::new(engine);

    let result = bridge
        .fetch(&api::Fetch::new(cache()).with_fetch_cache_files(true))
        .unwrap();

    assert_eq!(bridge.engine().calls(), vec!["resolve", "fetch_cache_files"]);
    assert!(result.artifacts.iter().all(|(artifact, _)| *artifact == api::Artifact::placeholder()));
    assert_eq!(result.files(), vec![&PathBuf::from("/cache/a.jar"), &PathBuf::from("/cache/b.pom")]);
}

#[test]
fn test_fetch_uses_defaults_for_unset_fields() {
    let bridge = Bridge::new(FakeEngine::default());

    bridge.fetch(&api::Fetch::new(cache())).unwrap();

    let resolve = bridge.engine().last_resolve();
    assert_eq!(resolve.repositories, Resolve::default_repositories());
    assert_eq!(resolve.params, fetchkit_core::ResolutionParams::default());
}

#[test]
fn test_fetch_rejects_invalid_repository_before_engine() {
    let bridge = Bridge::new(FakeEngine::default());

    let request = api::Fetch::new(cache()).add_repository(api::Repository::ivy("https://repo/[module"));
    let error = bridge.fetch(&request).unwrap_err();

    assert!(matches!(error, api::Error::InvalidArgument { .. }));
    assert!(bridge.engine().calls().is_empty());
}

#[derive(Debug)]
struct InMemoryRepository;

impl CustomRepository for InMemoryRepository {
    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

#[test]
fn test_opaque_repository_reaches_engine_unchanged() {
    let custom: Arc<dyn CustomRepository> = Arc::new(InMemoryRepository);
    let opaque = crate::entity::to_public_repository(&Repository::Custom(custom.clone()));
    let bridge = Bridge::new(FakeEngine::default());

    bridge.fetch(&api::Fetch::new(cache()).add_repository(opaque)).unwrap();

    match &bridge.engine().last_resolve().repositories[..] {
        [Repository::Custom(seen)] => assert!(Arc::ptr_eq(seen, &custom)),
        other => panic!("unexpected repositories {:?}", other),
    }
}

#[derive(Default)]
struct CountingLogger {
    events: Mutex<Vec<String>>,
}

impl api::SimpleLogger for CountingLogger {
    fn start(&self, url: &str) {
        self.events.lock().unwrap().push(format!("start {}", url));
    }

    fn length(&self, url: &str, total_length: u64, _already_downloaded: u64, _watching: bool) {
        self.events.lock().unwrap().push(format!("length {} {}", url, total_length));
    }

    fn progress(&self, url: &str, downloaded: u64) {
        self.events.lock().unwrap().push(format!("progress {} {}", url, downloaded));
    }

    fn done(&self, url: &str, success: bool) {
        self.events.lock().unwrap().push(format!("done {} {}", url, success));
    }
}

#[test]
fn test_fetch_reports_progress_to_simple_logger() {
    let engine = FakeEngine {
        artifacts: vec![(Artifact::new("u"), "/cache/u".into())],
        ..FakeEngine::default()
    };
    let bridge = Bridge::new(engine);
    let logger = Arc::new(CountingLogger::default());

    bridge
        .fetch(&api::Fetch::new(cache().with_simple_logger(logger.clone())))
        .unwrap();

    assert_eq!(
        *logger.events.lock().unwrap(),
        vec!["start u", "length u 100", "progress u 100", "done u true"]
    );
}

#[test]
fn test_complete() {
    let bridge = Bridge::new(FakeEngine::default());

    let result = bridge
        .complete(&api::Complete::new(cache(), "org.typelevel:cats").with_scala_version("2.13.12"))
        .unwrap();

    assert_eq!(result.from, 14);
    assert_eq!(result.completions, vec!["cats-core", "cats-kernel"]);
    assert_eq!(bridge.engine().calls(), vec!["complete org.typelevel:cats"]);
}

#[test]
fn test_versions_merges_successful_listings() {
    let mut listings = HashMap::new();
    listings.insert(
        "https://a.example.org".to_string(),
        Ok(Versions::new("1.10", "1.10", vec!["1.2".to_string(), "1.10".to_string()], None)),
    );
    listings.insert(
        "https://b.example.org".to_string(),
        Ok(Versions::new("2.0-RC1", "1.9", vec!["1.9".to_string(), "2.0-RC1".to_string()], None)),
    );
    let bridge = Bridge::new(FakeEngine {
        listings,
        ..FakeEngine::default()
    });

    let request = api::VersionsRequest::new(cache(), api::Module::new("org", "lib"))
        .add_repository(api::Repository::maven("https://a.example.org"))
        .add_repository(api::Repository::maven("https://broken.example.org"))
        .add_repository(api::Repository::maven("https://b.example.org"));
    let result = bridge.versions(&request).unwrap();

    assert_eq!(result.listings.len(), 2);
    assert_eq!(result.listings[0].0, api::Repository::maven("https://a.example.org"));
    assert_eq!(
        result.errors,
        vec![(
            api::Repository::maven("https://broken.example.org"),
            "no listing in https://broken.example.org".to_string()
        )]
    );
    assert_eq!(result.merged.latest, "2.0-RC1");
    assert_eq!(result.merged.release, "1.10");
    assert_eq!(result.merged.available, vec!["1.2", "1.9", "1.10", "2.0-RC1"]);
    assert_eq!(bridge.engine().calls().len(), 3);
}

#[test]
fn test_cache_get() {
    let mut files = HashMap::new();
    files.insert("https://repo/a.jar".to_string(), Utf8PathBuf::from("/var/cache/fetchkit/a.jar"));
    let bridge = Bridge::new(FakeEngine {
        files,
        ..FakeEngine::default()
    });

    let file = bridge.cache_get(&cache(), &api::Artifact::new("https://repo/a.jar")).unwrap();
    assert_eq!(file, PathBuf::from("/var/cache/fetchkit/a.jar"));

    let error = bridge
        .cache_get(&cache(), &api::Artifact::new("https://repo/missing.jar"))
        .unwrap_err();
    match error {
        api::Error::DownloadingArtifacts { failures, .. } => {
            assert_eq!(failures.len(), 1);
            assert!(failures.contains_key("https://repo/missing.jar"));
        },
        other => panic!("unexpected error {:?}", other),
    }
    assert!(bridge.engine().calls().iter().all(|call| !call.ends_with("(off pool)")));
}

#[test]
fn test_archive_cache_get() {
    let mut files = HashMap::new();
    files.insert("https://repo/jdk.tar.gz".to_string(), Utf8PathBuf::from("jdk"));
    let bridge = Bridge::new(FakeEngine {
        files,
        ..FakeEngine::default()
    });

    let dir = bridge
        .archive_cache_get(&archive_cache(), &api::Artifact::new("https://repo/jdk.tar.gz"))
        .unwrap();
    assert_eq!(dir, PathBuf::from("/var/cache/fetchkit-arc/jdk"));

    let error = bridge
        .archive_cache_get(&archive_cache(), &api::Artifact::new("https://repo/none.zip"))
        .unwrap_err();
    assert!(error.is_download());
}

#[test]
fn test_archive_cache_get_if_exists() {
    let mut files = HashMap::new();
    files.insert("https://repo/jdk.tar.gz".to_string(), Utf8PathBuf::from("jdk"));
    let bridge = Bridge::new(FakeEngine {
        files,
        ..FakeEngine::default()
    });

    let cached = bridge
        .archive_cache_get_if_exists(&archive_cache(), &api::Artifact::new("https://repo/jdk.tar.gz"))
        .unwrap();
    assert_eq!(cached, Some(PathBuf::from("/var/cache/fetchkit-arc/jdk")));

    let missing = bridge
        .archive_cache_get_if_exists(&archive_cache(), &api::Artifact::new("https://repo/none.zip"))
        .unwrap();
    assert_eq!(missing, None);
}

#[test]
fn test_archive_cache_get_if_exists_failure() {
    let bridge = Bridge::new(FakeEngine {
        archive_error: Some(ArtifactError::DownloadError {
            reason: "permission denied".to_string(),
        }),
        ..FakeEngine::default()
    });

    let error = bridge
        .archive_cache_get_if_exists(&archive_cache(), &api::Artifact::new("https://repo/jdk.tar.gz"))
        .unwrap_err();

    match error {
        api::Error::DownloadingArtifacts { failures, .. } => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures["https://repo/jdk.tar.gz"], "download error: permission denied");
        },
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(
        bridge.engine().calls(),
        vec!["archive_file_if_exists https://repo/jdk.tar.gz"]
    );
}

#[test]
fn test_jvm_manager_get_uses_default_index() {
    let bridge = Bridge::new(FakeEngine::default());

    let home = bridge.jvm_manager_get(&archive_cache(), "temurin:17").unwrap();
    assert_eq!(home, PathBuf::from("/var/cache/fetchkit-arc/jvm/temurin-17"));
    assert_eq!(bridge.engine().calls(), vec!["jvm_home Default temurin:17"]);

    let error = bridge.jvm_manager_get(&archive_cache(), "unknown:1").unwrap_err();
    assert_eq!(
        error,
        api::Error::Other {
            message: "No JVM found for unknown:1".to_string()
        }
    );
}

#[test]
fn test_compare_versions() {
    assert!(compare_versions("1.2", "1.10") < 0);
    assert_eq!(compare_versions("1.0", "1.0"), 0);
    assert_eq!(compare_versions("2.0", "2.0-RC1"), 1);
    assert_eq!(compare_versions("1.0-alpha", "1.0-beta"), -1);
}
