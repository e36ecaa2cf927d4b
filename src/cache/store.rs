//! On-disk cache snapshot

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::entry::Cache;
use crate::error::Result;
use crate::sink::write_atomic;

/// Reads and writes the whole cache as one JSON file
#[derive(Debug, Clone)]
pub struct CacheStore {
    cache_file: PathBuf,
}

impl CacheStore {
    pub fn new(cache_file: impl Into<PathBuf>) -> Self {
        Self {
            cache_file: cache_file.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.cache_file
    }

    /// Load the snapshot, or an empty cache if it is missing or unreadable
    pub fn load(&self) -> Cache {
        if !self.cache_file.exists() {
            debug!("No cache file at {}", self.cache_file.display());
            return Cache::new();
        }

        match self.try_load() {
            Ok(cache) => {
                debug!(
                    "Loaded {} cache entries from {}",
                    cache.len(),
                    self.cache_file.display()
                );
                cache
            }
            Err(e) => {
                warn!("Failed to load cache: {e}");
                Cache::new()
            }
        }
    }

    /// Load the snapshot, surfacing read and parse errors
    pub fn try_load(&self) -> Result<Cache> {
        let data = fs::read_to_string(&self.cache_file)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Replace the snapshot with `cache`
    pub fn save(&self, cache: &Cache) -> Result<()> {
        if let Some(parent) = self.cache_file.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(cache)?;
        write_atomic(&self.cache_file, &json)
    }

    /// Delete the snapshot; returns whether a file was removed
    pub fn clear(&self) -> Result<bool> {
        if self.cache_file.exists() {
            fs::remove_file(&self.cache_file)?;
            return Ok(true);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheEntry, FetchResult};
    use chrono::Utc;
    use tempfile::TempDir;

    fn make_result(views: &str) -> FetchResult {
        FetchResult {
            formatted_views: views.to_string(),
            raw_view_count: 1,
            thumbnail_url: "http://img/high.jpg".to_string(),
            source_video_id: "vid".to_string(),
            source_title: "title".to_string(),
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path().join("youtube_cache.json"));

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_invalid_json_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path().join("youtube_cache.json"));
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().is_empty());
        assert!(store.try_load().is_err());
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path().join("youtube_cache.json"));
        fs::write(store.path(), r#"["a", "b"]"#).unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path().join(".cache").join("youtube_cache.json"));

        store.save(&Cache::new()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path().join("youtube_cache.json"));

        let mut cache = Cache::new();
        cache.insert("gta_v", CacheEntry::new(make_result("1.2M views"), Utc::now()));
        cache.insert("valorant", CacheEntry::new(make_result("850.0K views"), Utc::now()));

        store.save(&cache).unwrap();
        assert_eq!(store.load(), cache);
    }

    #[test]
    fn test_load_then_save_preserves_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path().join("youtube_cache.json"));

        let mut cache = Cache::new();
        cache.insert("gta_v", CacheEntry::new(make_result("1.2M views"), Utc::now()));
        store.save(&cache).unwrap();
        let first = fs::read_to_string(store.path()).unwrap();

        store.save(&store.load()).unwrap();
        let second = fs::read_to_string(store.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path().join("youtube_cache.json"));

        assert!(!store.clear().unwrap());
        store.save(&Cache::new()).unwrap();
        assert!(store.clear().unwrap());
        assert!(!store.path().exists());
    }
}
