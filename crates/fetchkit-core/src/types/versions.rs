//! Version listings, as published in repository metadata.

use chrono::NaiveDateTime;

use super::Version;

/// Versions a repository knows for a module
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Versions {
    pub latest: String,
    pub release: String,
    /// Available versions, in the order the repository listed them
    pub available: Vec<String>,
    pub last_updated: Option<NaiveDateTime>,
}

impl Versions {
    pub fn new(
        latest: impl Into<String>,
        release: impl Into<String>,
        available: Vec<String>,
        last_updated: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            latest: latest.into(),
            release: release.into(),
            available,
            last_updated,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty() && self.release.is_empty() && self.available.is_empty()
    }

    /// Combine the listings of several repositories
    ///
    /// `latest` and `release` are the highest non-empty values, `available`
    /// is the deduplicated union sorted in ascending version order, and
    /// `last_updated` is the most recent timestamp.
    pub fn merge<'a>(listings: impl IntoIterator<Item = &'a Versions>) -> Versions {
        let mut merged = Versions::default();

        for listing in listings {
            merged.latest = highest(&merged.latest, &listing.latest);
            merged.release = highest(&merged.release, &listing.release);
            for version in &listing.available {
                if !merged.available.contains(version) {
                    merged.available.push(version.clone());
                }
            }
            merged.last_updated = match (merged.last_updated, listing.last_updated) {
                (Some(a), Some(b)) => Some(a.max(b)),
                (a, b) => a.or(b),
            };
        }

        merged
            .available
            .sort_by_cached_key(|version| Version::parse(version));
        merged
    }
}

fn highest(current: &str, candidate: &str) -> String {
    if current.is_empty() {
        return candidate.to_string();
    }
    if candidate.is_empty() {
        return current.to_string();
    }
    if Version::parse(candidate) > Version::parse(current) {
        candidate.to_string()
    } else {
        current.to_string()
    }
}
