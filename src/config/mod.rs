mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{
    ApiConfig, Config, OutputConfig, PollConfig, SearchConfig, API_KEY_ENV, DEFAULT_BASE_URL,
};
