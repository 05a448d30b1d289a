//! Platform clients
//!
//! - [`bluesky`]: AT Protocol calls over XRPC (identity, session, feeds, posting)
//! - [`nitter`]: read-only Twitter timelines scraped from a Nitter mirror's RSS feed

pub mod bluesky;
pub mod nitter;
