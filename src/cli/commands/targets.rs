use chrono::Utc;

use crate::cache::CacheStore;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::output::{self, TargetStatus};

/// List configured targets with their cached results
pub fn targets(config: &Config, format: OutputFormat) -> Result<String> {
    let cache = CacheStore::new(&config.output.cache_file).load();
    let rows = TargetStatus::collect(&config.targets, &cache, Utc::now(), config.poll.ttl());
    output::format_targets(&rows, format)
}
