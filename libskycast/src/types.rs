//! Core types for Skycast

use serde::{Deserialize, Serialize};
use std::fmt;

const AT_URI_PREFIX: &str = "at://";

/// AT Protocol account identifier
///
/// Accepts both the bare (`did:plc:...`) and the URI (`at://did:plc:...`)
/// spelling. The bare form is what goes over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Did(String);

impl Did {
    pub fn new(value: &str) -> Self {
        Self(value.strip_prefix(AT_URI_PREFIX).unwrap_or(value).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_uri(&self) -> String {
        format!("{}{}", AT_URI_PREFIX, self.0)
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An original, top-level post from an author feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub uri: String,
    pub text: String,
    pub created_at: String,
    pub reply_count: u64,
    pub repost_count: u64,
    pub like_count: u64,
    pub author_handle: String,
    pub author_display_name: String,
    pub author_avatar: String,
}

/// Result of `com.atproto.repo.createRecord`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRecord {
    pub uri: String,
    pub cid: String,
}

/// Account profile as returned by `app.bsky.actor.getProfile`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub did: String,
    pub handle: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub follows_count: u64,
    #[serde(default)]
    pub posts_count: u64,
}

/// A tweet scraped from a Nitter RSS feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    pub url: String,
    /// Raw HTML body of the feed item
    pub text: String,
    pub created_at: String,
    pub author_handle: String,
    pub author_display_name: String,
    pub author_avatar: String,
}
