//! Time-boxed cache of lookup results
//!
//! One JSON file maps each target key to its latest result and fetch time.

mod entry;
mod store;

pub use entry::{is_fresh, parse_timestamp, Cache, CacheEntry, FetchResult};
pub use store::CacheStore;

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Get cache status information
pub fn status(store: &CacheStore, now: DateTime<Utc>, ttl: Duration) -> CacheStatus {
    let path = store.path().to_path_buf();

    if !path.exists() {
        return CacheStatus {
            path,
            exists: false,
            readable: false,
            entries: Vec::new(),
        };
    }

    let cache = match store.try_load() {
        Ok(cache) => cache,
        Err(_) => {
            return CacheStatus {
                path,
                exists: true,
                readable: false,
                entries: Vec::new(),
            }
        }
    };

    let entries = cache
        .iter()
        .map(|(key, entry)| CacheEntryStatus {
            key: key.clone(),
            views: entry.data.formatted_views.clone(),
            title: entry.data.source_title.clone(),
            age_secs: entry.age_secs(now),
            fresh: entry.is_fresh(now, ttl),
        })
        .collect();

    CacheStatus {
        path,
        exists: true,
        readable: true,
        entries,
    }
}

/// Overall cache status
#[derive(Debug, Serialize)]
pub struct CacheStatus {
    pub path: PathBuf,
    pub exists: bool,
    /// False when the file exists but does not parse
    pub readable: bool,
    pub entries: Vec<CacheEntryStatus>,
}

/// Status of a single cache entry
#[derive(Debug, Serialize)]
pub struct CacheEntryStatus {
    pub key: String,
    pub views: String,
    pub title: String,
    pub age_secs: Option<i64>,
    pub fresh: bool,
}
