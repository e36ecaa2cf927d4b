use thiserror::Error;

/// Result type alias for gamepulse operations
pub type Result<T> = std::result::Result<T, PulseError>;

/// Errors that can occur while polling, caching or writing output
#[derive(Error, Debug)]
pub enum PulseError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing required configuration
    #[error("{0}")]
    ConfigMissing(String),

    /// API error with HTTP status
    #[error("YouTube API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP 403 from the search API
    #[error("YouTube API quota exceeded or invalid API key")]
    QuotaExceeded,

    /// HTTP 429 from the search API
    #[error("YouTube API rate limit exceeded")]
    RateLimited,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Logger could not be installed
    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] fern::InitError),
}

impl PulseError {
    /// Create an API error from HTTP status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Map a non-success HTTP status to the matching error
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            403 => Self::QuotaExceeded,
            429 => Self::RateLimited,
            _ => Self::api(status, message),
        }
    }

    /// Create a config missing error with helpful message
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::ConfigMissing(message.into())
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::ConfigMissing(_) | Self::Toml(_) => 2,
            _ => 1,
        }
    }
}
