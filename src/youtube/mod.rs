mod client;
pub mod types;

pub use client::YouTubeClient;
pub use types::*;
