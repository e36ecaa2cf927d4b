//! `run` and `once`: the polling entry points

use log::{info, LevelFilter};

use crate::cache::CacheStore;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::interrupt::setup_interrupt_handler;
use crate::logging::setup_logging;
use crate::output;
use crate::poller::{PollSettings, Poller};
use crate::sink::OutputSink;
use crate::youtube::YouTubeClient;

/// Poll forever, until Ctrl+C
pub fn run(config: &Config, level: LevelFilter) -> Result<String> {
    setup_logging(level, config.output.log_file.as_deref())?;

    let mut poller = build_poller(config)?;
    let interrupted = setup_interrupt_handler();

    info!(
        "Tracking {} targets every {}s (cache TTL {}s)",
        config.targets.len(),
        config.poll.cycle_secs,
        config.poll.ttl_secs
    );

    let cycles = poller.run(&config.targets, &interrupted);
    info!("Stopped by user after {cycles} cycles");

    // releases the HTTP session
    drop(poller);
    info!("YouTube data fetcher stopped");

    Ok(String::new())
}

/// Run exactly one cycle and report what happened
pub fn once(config: &Config, level: LevelFilter, format: OutputFormat) -> Result<String> {
    setup_logging(level, config.output.log_file.as_deref())?;

    let mut poller = build_poller(config)?;
    let interrupted = setup_interrupt_handler();

    let report = poller.run_cycle(&config.targets, &interrupted);
    info!("Cycle complete: {report}");

    output::format_report(&report, format)
}

/// Client first, so a missing key fails before any disk access
fn build_poller(config: &Config) -> Result<Poller<YouTubeClient>> {
    let client = YouTubeClient::new(config)?;
    info!("YouTube API initialized successfully");

    let store = CacheStore::new(&config.output.cache_file);
    let cache = store.load();

    Ok(Poller::new(
        client,
        store,
        OutputSink::new(&config.output.data_dir),
        cache,
        PollSettings::from(&config.poll),
    ))
}
