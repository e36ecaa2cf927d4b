//! Cached lookup results and their freshness

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::format::parse_view_count;

/// Outcome of a successful lookup for one target
///
/// Serialized under the short names existing cache files use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    #[serde(rename = "views")]
    pub formatted_views: String,
    #[serde(rename = "raw_views", default, deserialize_with = "count_from_number_or_string")]
    pub raw_view_count: u64,
    #[serde(rename = "image_url", default)]
    pub thumbnail_url: String,
    #[serde(rename = "video_id", default)]
    pub source_video_id: String,
    #[serde(rename = "title", default)]
    pub source_title: String,
}

/// Older caches store the raw count as the API's decimal string
fn count_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCount {
        Number(u64),
        Text(String),
    }

    Ok(match RawCount::deserialize(deserializer)? {
        RawCount::Number(n) => n,
        RawCount::Text(s) => parse_view_count(&s).unwrap_or(0),
    })
}

/// A result plus the moment it was fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// ISO-8601 fetch time
    pub timestamp: String,
    pub data: FetchResult,
}

impl CacheEntry {
    /// Stamp a result with the given fetch time
    pub fn new(data: FetchResult, fetched_at: DateTime<Utc>) -> Self {
        Self {
            timestamp: fetched_at.to_rfc3339(),
            data,
        }
    }

    /// Whether this entry is younger than `ttl` at `now`
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        is_fresh(&self.timestamp, now, ttl)
    }

    /// Seconds since the fetch, if the timestamp parses
    pub fn age_secs(&self, now: DateTime<Utc>) -> Option<i64> {
        parse_timestamp(&self.timestamp).map(|at| (now - at).num_seconds())
    }
}

/// Parse an RFC 3339 timestamp, or a naive ISO-8601 one taken as local time
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// True iff `now - timestamp < ttl`; unparsable timestamps are stale
pub fn is_fresh(timestamp: &str, now: DateTime<Utc>, ttl: Duration) -> bool {
    let Some(fetched_at) = parse_timestamp(timestamp) else {
        return false;
    };

    match (now - fetched_at).to_std() {
        Ok(age) => age < ttl,
        // fetched_at is ahead of now
        Err(_) => true,
    }
}

/// Map from target key to its latest entry; one entry per key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cache {
    entries: BTreeMap<String, CacheEntry>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Replace the entry for `key`
    pub fn insert(&mut self, key: impl Into<String>, entry: CacheEntry) {
        self.entries.insert(key.into(), entry);
    }

    /// Fresh result for `key`, if any
    pub fn fresh(&self, key: &str, now: DateTime<Utc>, ttl: Duration) -> Option<&FetchResult> {
        self.get(key)
            .filter(|entry| entry.is_fresh(now, ttl))
            .map(|entry| &entry.data)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CacheEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
