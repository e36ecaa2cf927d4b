use colored::Colorize;

use crate::cli::args::{ConfigArgs, ConfigCommands, OutputFormat};
use crate::config::{Config, Paths, API_KEY_ENV};
use crate::error::Result;

/// Handle the config command
pub fn config(
    config: &Config,
    paths: &Paths,
    args: &ConfigArgs,
    format: OutputFormat,
) -> Result<String> {
    match &args.command {
        ConfigCommands::Show => config_show(config, format),
        ConfigCommands::Path => config_path(paths, format),
    }
}

/// Keep the first and last four characters of a key
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "****".to_string()
    }
}

/// Show the effective configuration
fn config_show(config: &Config, format: OutputFormat) -> Result<String> {
    let key_source = if std::env::var(API_KEY_ENV).is_ok_and(|k| !k.trim().is_empty()) {
        Some(API_KEY_ENV)
    } else if config.api.key.is_some() {
        Some("config file")
    } else {
        None
    };
    let masked = config.require_api_key().ok().map(|k| mask_key(&k));

    match format {
        OutputFormat::Pretty => {
            let mut output = String::new();
            output.push_str(&format!("{}\n", "Configuration".bold()));
            output.push_str(&"─".repeat(40));
            output.push('\n');

            output.push_str(&format!("\n{}\n", "[api]".cyan()));
            let key_display = match (&masked, key_source) {
                (Some(k), Some(source)) => format!("{} {}", k, format!("(from {source})").dimmed()),
                _ => "(not set)".dimmed().to_string(),
            };
            output.push_str(&format!("  key = {}\n", key_display));
            output.push_str(&format!("  base_url = {}\n", config.api.base_url));

            output.push_str(&format!("\n{}\n", "[search]".cyan()));
            output.push_str(&format!("  max_results = {}\n", config.search.max_results));
            output.push_str(&format!("  category_id = {}\n", config.search.category_id));
            output.push_str(&format!("  order = {}\n", config.search.order));
            output.push_str(&format!("  language = {}\n", config.search.language));

            output.push_str(&format!("\n{}\n", "[poll]".cyan()));
            output.push_str(&format!("  ttl_secs = {}\n", config.poll.ttl_secs));
            output.push_str(&format!("  cycle_secs = {}\n", config.poll.cycle_secs));
            output.push_str(&format!("  request_delay_ms = {}\n", config.poll.request_delay_ms));
            output.push_str(&format!(
                "  request_timeout_secs = {}\n",
                config.poll.request_timeout_secs
            ));

            output.push_str(&format!("\n{}\n", "[output]".cyan()));
            output.push_str(&format!("  data_dir = {}\n", config.output.data_dir.display()));
            output.push_str(&format!("  cache_file = {}\n", config.output.cache_file.display()));
            output.push_str(&format!(
                "  log_file = {}\n",
                config
                    .output
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(stderr only)".to_string())
            ));

            output.push_str(&format!("\n{} {}\n", "[[targets]]".cyan(), config.targets.len()));
            for target in &config.targets {
                output.push_str(&format!("  {} = {:?}\n", target.key(), target.query));
            }

            Ok(output.trim_end().to_string())
        }
        OutputFormat::Json => {
            // Don't expose the full key in JSON output either
            let mut safe_config = config.clone();
            safe_config.api.key = masked;
            Ok(serde_json::to_string_pretty(&safe_config)?)
        }
    }
}

/// Show configuration file path
fn config_path(paths: &Paths, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => {
            let mut output = String::new();
            output.push_str(&format!("Config file: {}\n", paths.config_file.display()));
            output.push_str(&format!(
                "Exists: {}",
                if paths.config_exists() {
                    "yes".green()
                } else {
                    "no".yellow()
                }
            ));
            Ok(output)
        }
        OutputFormat::Json => {
            let result = serde_json::json!({
                "path": paths.config_file.display().to_string(),
                "exists": paths.config_exists()
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}
