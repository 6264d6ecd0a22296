//! Common utilities for benchmarks

use std::sync::Arc;

use criterion::Criterion;
use fetchkit_core::{Dependency, DependencyManagementKey, DependencyManagementValues, Module};
use fetchkit_core::types::{Classifier, ModuleName, Organization, Type};
use pprof::criterion::{Output, PProfProfiler};

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// Engine dependencies with attributes, exclusions and overrides
pub fn sample_dependencies(count: usize) -> Vec<Dependency> {
    (0..count)
        .map(|index| {
            let module = Module::new(format!("org.example{}", index % 10), format!("lib-{}", index))
                .with_attribute("scalaVersion", "2.13");
            Dependency::new(module, format!("1.{}.{}", index % 7, index % 13))
                .with_exclusion(Organization::new("org.slf4j"), ModuleName::new("*"))
                .with_override(
                    DependencyManagementKey {
                        organization: Organization::new("org.example"),
                        name: ModuleName::new(format!("managed-{}", index % 5)),
                        type_: Type::jar(),
                        classifier: Classifier::default(),
                    },
                    DependencyManagementValues {
                        version: "2.0".to_string(),
                        ..DependencyManagementValues::default()
                    },
                )
        })
        .collect()
}

/// Version strings mixing numeric parts and qualifiers
pub fn sample_versions(count: usize) -> Vec<String> {
    const QUALIFIERS: [&str; 6] = ["", "-alpha", "-beta2", "-RC1", "-SNAPSHOT", "-M3"];
    (0..count)
        .map(|index| {
            format!(
                "{}.{}.{}{}",
                index % 4,
                index % 17,
                index % 23,
                QUALIFIERS[index % QUALIFIERS.len()]
            )
        })
        .collect()
}

/// Single-threaded pool for conversions that need a cache
pub fn bench_pool() -> Arc<rayon::ThreadPool> {
    match rayon::ThreadPoolBuilder::new().num_threads(1).build() {
        Ok(pool) => Arc::new(pool),
        Err(error) => panic!("failed to build benchmark pool: {}", error),
    }
}
