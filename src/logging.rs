//! Log output to stderr and, optionally, a log file

use std::fs;
use std::path::Path;

use log::{info, LevelFilter};

use crate::error::Result;

/// Map `-v`/`-q` flags to a level: Warn, Info, Debug, Trace
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Warn;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger
///
/// Lines look like `2025-06-01 12:00:00,123 - gamepulse::poller - INFO - message`.
pub fn setup_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<()> {
    dispatch(level, log_file)?;
    info!("Logging initialized at {level}");
    Ok(())
}

fn dispatch(level: LevelFilter, log_file: Option<&Path>) -> std::result::Result<(), fern::InitError> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} - {} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .level_for("reqwest", LevelFilter::Warn)
        .level_for("hyper", LevelFilter::Warn)
        .level_for("hyper_util", LevelFilter::Warn)
        .chain(std::io::stderr());

    if let Some(path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    dispatch.apply()?;
    Ok(())
}
