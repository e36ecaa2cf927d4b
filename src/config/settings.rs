use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use super::paths::Paths;
use crate::error::{PulseError, Result};
use crate::target::{default_targets, Target};

/// Environment variable holding the YouTube Data API key
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// YouTube Data API v3 root
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Upper bounds for `[poll]` values, in seconds
const MAX_CYCLE_SECS: u64 = 7 * 24 * 60 * 60;
const MAX_TTL_SECS: u64 = 30 * 24 * 60 * 60;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 10 * 60;
const MAX_REQUEST_DELAY_MS: u64 = 60 * 1000;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Search ranking and paging options
    #[serde(default)]
    pub search: SearchConfig,

    /// Cache lifetime and loop timing
    #[serde(default)]
    pub poll: PollConfig,

    /// Where results, cache and logs go
    #[serde(default)]
    pub output: OutputConfig,

    /// Games to track, in polling order
    #[serde(default = "default_targets")]
    pub targets: Vec<Target>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            search: SearchConfig::default(),
            poll: PollConfig::default(),
            output: OutputConfig::default(),
            targets: default_targets(),
        }
    }
}

/// API-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API key, used when `YOUTUBE_API_KEY` is unset
    pub key: Option<String>,
    /// API root URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: None,
            base_url: default_base_url(),
        }
    }
}

/// Options passed along with every search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_results: u32,
    /// Video category filter (20 = Gaming)
    pub category_id: String,
    pub order: String,
    pub language: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 5,
            category_id: "20".to_string(),
            order: "viewCount".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Polling loop timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// How long a cached result stays fresh
    pub ttl_secs: u64,
    /// Sleep between cycles
    pub cycle_secs: u64,
    /// Pause after each remote fetch
    pub request_delay_ms: u64,
    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 300,
            cycle_secs: 300,
            request_delay_ms: 1000,
            request_timeout_secs: 30,
        }
    }
}

impl PollConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn cycle_period(&self) -> Duration {
        Duration::from_secs(self.cycle_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Output locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving `{key}_views.txt` and `{key}_image_url.txt`
    pub data_dir: PathBuf,
    /// JSON cache snapshot
    pub cache_file: PathBuf,
    /// Optional log file, appended to alongside stderr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("public/data"),
            cache_file: PathBuf::from(".cache/youtube_cache.json"),
            log_file: Some(PathBuf::from("app.log")),
        }
    }
}

impl Config {
    /// Load configuration from a specific paths instance
    pub fn load_from(paths: &Paths) -> Result<Self> {
        if !paths.config_exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&paths.config_file)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that target names are usable as keys and poll timings are in range
    pub fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            return Err(PulseError::Config("no targets configured".to_string()));
        }

        let mut seen = HashSet::new();
        for target in &self.targets {
            if target.name.trim().is_empty() {
                return Err(PulseError::Config("target name cannot be empty".to_string()));
            }
            let key = target.key();
            if key.contains(['/', '\\']) || key.contains("..") {
                return Err(PulseError::Config(format!(
                    "target name '{}' cannot contain '/', '\\' or '..'",
                    target.name
                )));
            }
            if !seen.insert(target.key()) {
                return Err(PulseError::Config(format!(
                    "duplicate target key '{}' (from '{}')",
                    target.key(),
                    target.name
                )));
            }
        }

        check_range("poll.cycle_secs", self.poll.cycle_secs, 1, MAX_CYCLE_SECS)?;
        check_range("poll.ttl_secs", self.poll.ttl_secs, 0, MAX_TTL_SECS)?;
        check_range(
            "poll.request_timeout_secs",
            self.poll.request_timeout_secs,
            1,
            MAX_REQUEST_TIMEOUT_SECS,
        )?;
        check_range(
            "poll.request_delay_ms",
            self.poll.request_delay_ms,
            0,
            MAX_REQUEST_DELAY_MS,
        )?;

        Ok(())
    }

    /// Get the API key from the environment or config, or return an error with instructions
    pub fn require_api_key(&self) -> Result<String> {
        pick_api_key(std::env::var(API_KEY_ENV).ok(), self.api.key.as_deref())
    }
}

fn check_range(name: &str, value: u64, min: u64, max: u64) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(PulseError::Config(format!(
            "{name} must be between {min} and {max}, got {value}"
        )))
    }
}

/// Environment wins over the config file; blank values count as missing
fn pick_api_key(env_value: Option<String>, file_value: Option<&str>) -> Result<String> {
    env_value
        .filter(|k| !k.trim().is_empty())
        .or_else(|| {
            file_value
                .filter(|k| !k.trim().is_empty())
                .map(str::to_string)
        })
        .ok_or_else(|| {
            PulseError::config_missing(format!(
                "{API_KEY_ENV} not found in environment variables. \
                 Create a .env file with {API_KEY_ENV}=your_api_key_here or set api.key in the config file."
            ))
        })
}
