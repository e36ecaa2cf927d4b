pub mod json;
pub mod pretty;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

use crate::cache::{Cache, CacheStatus};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::poller::CycleReport;
use crate::target::Target;

/// A configured target joined with what the cache knows about it
#[derive(Debug, Serialize)]
pub struct TargetStatus {
    pub name: String,
    pub key: String,
    pub query: String,
    pub fallback_image: Option<String>,
    pub views: Option<String>,
    pub age_secs: Option<i64>,
    pub fresh: bool,
}

impl TargetStatus {
    /// Build one status row per target, in configured order
    pub fn collect(
        targets: &[Target],
        cache: &Cache,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Vec<Self> {
        targets
            .iter()
            .map(|target| {
                let key = target.key();
                let entry = cache.get(&key);
                Self {
                    name: target.name.clone(),
                    query: target.query.clone(),
                    fallback_image: target.fallback_image.clone(),
                    views: entry.map(|e| e.data.formatted_views.clone()),
                    age_secs: entry.and_then(|e| e.age_secs(now)),
                    fresh: entry.is_some_and(|e| e.is_fresh(now, ttl)),
                    key,
                }
            })
            .collect()
    }
}

/// Format a cycle summary based on output format
pub fn format_report(report: &CycleReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_report(report)),
        OutputFormat::Json => json::format_json(report),
    }
}

/// Format target rows based on output format
pub fn format_targets(targets: &[TargetStatus], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_targets(targets)),
        OutputFormat::Json => json::format_json(targets),
    }
}

/// Format cache status based on output format
pub fn format_cache_status(status: &CacheStatus, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_cache_status(status)),
        OutputFormat::Json => json::format_json(status),
    }
}
