//! The polling loop: reuse fresh cache entries, fetch the rest, write outputs
//!
//! Each cycle walks the targets in order. A target with a fresh cache entry
//! is written straight from the cache. Otherwise the video source is asked
//! for the current most-viewed video; on success the cache is updated and
//! persisted before the output files are rewritten. A target whose lookup
//! fails or finds nothing is skipped for this cycle and its previous files
//! and cache entry are left alone. Failed targets are retried next cycle,
//! at the same flat interval.

use std::fmt;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use chrono::Utc;
use log::{error, info, warn};
use serde::Serialize;

use crate::cache::{Cache, CacheEntry, CacheStore, FetchResult};
use crate::config::PollConfig;
use crate::error::{PulseError, Result};
use crate::interrupt::{is_interrupted, sleep_interruptible};
use crate::sink::OutputSink;
use crate::target::Target;
use crate::youtube::YouTubeClient;

/// Anything that can turn a search query into the top video's stats
pub trait VideoSource {
    /// Most-viewed result for `query`, or `None` when nothing matched
    fn lookup(&self, query: &str) -> Result<Option<FetchResult>>;
}

impl VideoSource for YouTubeClient {
    fn lookup(&self, query: &str) -> Result<Option<FetchResult>> {
        Ok(self.most_viewed(query)?.map(|video| video.to_fetch_result()))
    }
}

/// Result of asking the source about one target
#[derive(Debug)]
pub enum FetchOutcome {
    Fresh(FetchResult),
    /// The search succeeded but returned nothing usable
    Absent,
    Failed(PulseError),
}

/// Look up `target`, folding every error into the outcome
pub fn fetch<S: VideoSource + ?Sized>(source: &S, target: &Target) -> FetchOutcome {
    match source.lookup(&target.query) {
        Ok(Some(result)) => FetchOutcome::Fresh(result),
        Ok(None) => FetchOutcome::Absent,
        Err(e) => FetchOutcome::Failed(e),
    }
}

/// Loop timing, lifted out of the config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub ttl: Duration,
    pub cycle_period: Duration,
    pub request_delay: Duration,
}

impl From<&PollConfig> for PollSettings {
    fn from(config: &PollConfig) -> Self {
        Self {
            ttl: config.ttl(),
            cycle_period: config.cycle_period(),
            request_delay: config.request_delay(),
        }
    }
}

/// Per-cycle tally
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Fetched from the source and written
    pub fetched: usize,
    /// Written from a fresh cache entry
    pub cached: usize,
    /// Left untouched this cycle
    pub skipped: usize,
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fetched, {} cached, {} skipped",
            self.fetched, self.cached, self.skipped
        )
    }
}

/// What happened to one target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Fetched,
    Cached,
    Skipped { remote: bool },
}

impl Step {
    fn used_remote(self) -> bool {
        matches!(self, Step::Fetched | Step::Skipped { remote: true })
    }
}

/// Owns the cache, its store, the output sink and the video source
pub struct Poller<S> {
    source: S,
    store: CacheStore,
    sink: OutputSink,
    cache: Cache,
    settings: PollSettings,
}

impl<S: VideoSource> Poller<S> {
    pub fn new(
        source: S,
        store: CacheStore,
        sink: OutputSink,
        cache: Cache,
        settings: PollSettings,
    ) -> Self {
        Self {
            source,
            store,
            sink,
            cache,
            settings,
        }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    #[cfg(test)]
    fn source(&self) -> &S {
        &self.source
    }

    /// One pass over `targets`, in order
    ///
    /// Stops early, between targets, once `interrupted` is set.
    pub fn run_cycle(&mut self, targets: &[Target], interrupted: &AtomicBool) -> CycleReport {
        let mut report = CycleReport::default();

        for (i, target) in targets.iter().enumerate() {
            if is_interrupted(interrupted) {
                break;
            }

            let step = self.process(target);
            match step {
                Step::Fetched => report.fetched += 1,
                Step::Cached => report.cached += 1,
                Step::Skipped { .. } => report.skipped += 1,
            }

            let more = i + 1 < targets.len();
            if more && step.used_remote() && !self.settings.request_delay.is_zero() {
                sleep_interruptible(self.settings.request_delay, interrupted);
            }
        }

        report
    }

    fn process(&mut self, target: &Target) -> Step {
        let key = target.key();
        let now = Utc::now();

        let cached = self.cache.fresh(&key, now, self.settings.ttl).cloned();

        let (result, step) = match cached {
            Some(cached) => {
                info!("Using cached data for {}", target.name);
                (cached, Step::Cached)
            }
            None => {
                info!("Fetching data for {}", target.name);
                match fetch(&self.source, target) {
                    FetchOutcome::Fresh(result) => {
                        self.remember(&key, &result);
                        (result, Step::Fetched)
                    }
                    FetchOutcome::Absent => {
                        warn!("No videos found for {}, keeping previous output", target.name);
                        return Step::Skipped { remote: true };
                    }
                    FetchOutcome::Failed(e) => {
                        error!("Failed to fetch data for {}: {}", target.name, e);
                        return Step::Skipped { remote: true };
                    }
                }
            }
        };

        if let Err(e) = self.sink.write(target, &result) {
            error!("Failed to write output for {}: {}", target.name, e);
            return Step::Skipped {
                remote: step.used_remote(),
            };
        }

        info!(
            "Updated {}: {}, Title: {}",
            target.name,
            result.formatted_views,
            truncate_title(&result.source_title, 50)
        );
        step
    }

    /// Record a fresh result and flush the whole cache
    fn remember(&mut self, key: &str, result: &FetchResult) {
        self.cache
            .insert(key, CacheEntry::new(result.clone(), Utc::now()));

        // the in-memory entry stands; the next successful fetch rewrites the file
        if let Err(e) = self.store.save(&self.cache) {
            error!("Failed to save cache: {e}");
        }
    }

    /// Repeat cycles separated by the cycle period until interrupted
    ///
    /// Returns the number of cycles started.
    pub fn run(&mut self, targets: &[Target], interrupted: &AtomicBool) -> u64 {
        let mut cycles = 0;

        while !is_interrupted(interrupted) {
            let report = self.run_cycle(targets, interrupted);
            cycles += 1;
            info!("Cycle {cycles} complete: {report}");

            if is_interrupted(interrupted) {
                break;
            }

            info!(
                "Waiting {} seconds before next update...",
                self.settings.cycle_period.as_secs()
            );
            if !sleep_interruptible(self.settings.cycle_period, interrupted) {
                break;
            }
        }

        cycles
    }
}

/// First `max_chars` characters of a title, with "..." when cut
fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() > max_chars {
        let head: String = title.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}
