//! Cache management commands

use chrono::Utc;
use colored::Colorize;

use crate::cache::{self, CacheStore};
use crate::cli::args::{CacheArgs, CacheCommands, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output;

/// Handle cache commands
pub fn cache(config: &Config, args: &CacheArgs, format: OutputFormat) -> Result<String> {
    let store = CacheStore::new(&config.output.cache_file);

    match &args.command {
        CacheCommands::Status => status(config, &store, format),
        CacheCommands::Clear => clear(&store, format),
    }
}

fn status(config: &Config, store: &CacheStore, format: OutputFormat) -> Result<String> {
    let status = cache::status(store, Utc::now(), config.poll.ttl());
    output::format_cache_status(&status, format)
}

fn clear(store: &CacheStore, format: OutputFormat) -> Result<String> {
    let removed = store.clear()?;

    match format {
        OutputFormat::Pretty if removed => Ok(format!("{} Cache cleared", "✓".green())),
        OutputFormat::Pretty => Ok(format!("{} Cache already empty", "✓".green())),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "status": "cleared",
                "removed": removed,
                "path": store.path().display().to_string(),
            });
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}
