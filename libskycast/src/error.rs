//! Error types for Skycast

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SkycastError>;

#[derive(Error, Debug)]
pub enum SkycastError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    MissingInput(#[from] MissingInput),

    /// Non-200 response; carries the response body verbatim.
    #[error("{0}")]
    Upstream(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A required flag was empty or whitespace-only.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    #[error("missing DID")]
    Did,

    #[error("missing access token")]
    AccessToken,

    #[error("missing content")]
    Content,

    #[error("missing app password")]
    AppPassword,

    #[error("missing username")]
    Username,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum FeedError {
    #[error(transparent)]
    Rss(#[from] rss::Error),

    #[error("unexpected feed title {0:?}, expected \"<display name> / @<handle>\"")]
    Title(String),

    #[error("invalid publish date {value:?}: {source}")]
    PublishDate {
        value: String,
        source: chrono::ParseError,
    },
}
