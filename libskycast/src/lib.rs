//! Skycast - small Unix tools for reading and writing social feeds
//!
//! This library holds everything the `sky-*` binaries share: the XRPC
//! client used against Bluesky/AT Protocol servers, the RSS scrape used
//! against Nitter mirrors, configuration, logging and output encoding.

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod platforms;
pub mod types;
pub mod validation;
pub mod xrpc;

// Re-export commonly used types
pub use config::{Config, HttpConfig};
pub use error::{FeedError, MissingInput, Result, SkycastError};
pub use output::OutputFormat;
pub use platforms::bluesky::BlueskyClient;
pub use platforms::nitter::NitterClient;
pub use types::{CreatedRecord, Did, FeedItem, Profile, Tweet};
