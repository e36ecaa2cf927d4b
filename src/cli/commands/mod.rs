mod cache;
mod config;
mod poll;
mod targets;

pub use self::cache::cache;
pub use self::config::config;
pub use self::poll::{once, run};
pub use self::targets::targets;
