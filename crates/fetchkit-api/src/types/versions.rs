//! Version listings.

use serde::{Deserialize, Serialize};

/// Calendar timestamp, without time zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl Timestamp {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

/// Versions a repository lists for a module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionListing {
    pub latest: String,
    pub release: String,
    /// In repository order
    pub available: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<Timestamp>,
}

impl VersionListing {
    pub fn new(latest: impl Into<String>, release: impl Into<String>, available: Vec<String>) -> Self {
        Self {
            latest: latest.into(),
            release: release.into(),
            available,
            last_updated: None,
        }
    }

    pub fn with_last_updated(mut self, last_updated: Timestamp) -> Self {
        self.last_updated = Some(last_updated);
        self
    }
}
