pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod interrupt;
pub mod logging;
pub mod output;
pub mod poller;
pub mod sink;
pub mod target;
pub mod youtube;
