//! Bluesky platform implementation

use chrono::{SecondsFormat, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::config::HttpConfig;
use crate::error::Result;
use crate::types::{CreatedRecord, Did, FeedItem, Profile};
use crate::xrpc::XrpcClient;

/// Record type of a regular post
pub const POST_COLLECTION: &str = "app.bsky.feed.post";

const RESOLVE_HANDLE: &str = "com.atproto.identity.resolveHandle";
const CREATE_SESSION: &str = "com.atproto.server.createSession";
const GET_AUTHOR_FEED: &str = "app.bsky.feed.getAuthorFeed";
const GET_PROFILE: &str = "app.bsky.actor.getProfile";
const CREATE_RECORD: &str = "com.atproto.repo.createRecord";

#[derive(Debug, Deserialize)]
struct ResolveHandleOutput {
    did: String,
}

#[derive(Debug, Serialize)]
struct CreateSessionInput<'a> {
    identifier: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionOutput {
    access_jwt: String,
}

#[derive(Debug, Deserialize)]
struct AuthorFeed {
    #[serde(default)]
    feed: Vec<FeedViewPost>,
}

/// A field that only matters by being present and non-null.
#[derive(Debug, Deserialize)]
struct Marker(#[allow(dead_code)] IgnoredAny);

#[derive(Debug, Deserialize)]
struct FeedViewPost {
    post: PostView,
    #[serde(default)]
    reason: Option<Marker>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostView {
    uri: String,
    record: PostRecord,
    #[serde(default)]
    reply_count: u64,
    #[serde(default)]
    repost_count: u64,
    #[serde(default)]
    like_count: u64,
    author: AuthorView,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostRecord {
    #[serde(rename = "$type", default)]
    record_type: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    reply: Option<ReplyRef>,
}

#[derive(Debug, Deserialize)]
struct ReplyRef {
    #[serde(default)]
    parent: Option<Marker>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorView {
    handle: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    avatar: String,
}

#[derive(Debug, Serialize)]
struct CreateRecordInput<'a> {
    collection: &'a str,
    repo: &'a str,
    record: NewPost<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewPost<'a> {
    text: &'a str,
    created_at: String,
    #[serde(rename = "$type")]
    record_type: &'a str,
}

impl FeedViewPost {
    /// The author's own top-level post: not a reply and not reposted into the feed.
    fn is_original_post(&self) -> bool {
        let is_reply = self
            .post
            .record
            .reply
            .as_ref()
            .is_some_and(|reply| reply.parent.is_some());

        self.post.record.record_type == POST_COLLECTION && !is_reply && self.reason.is_none()
    }
}

impl From<FeedViewPost> for FeedItem {
    fn from(item: FeedViewPost) -> Self {
        let post = item.post;
        Self {
            uri: post.uri,
            text: post.record.text,
            created_at: post.record.created_at,
            reply_count: post.reply_count,
            repost_count: post.repost_count,
            like_count: post.like_count,
            author_handle: post.author.handle,
            author_display_name: post.author.display_name,
            author_avatar: post.author.avatar,
        }
    }
}

pub struct BlueskyClient {
    xrpc: XrpcClient,
}

impl BlueskyClient {
    /// Create a client for the service at `api` (e.g. `https://bsky.social/`)
    pub fn new(api: &str, config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            xrpc: XrpcClient::new(api, config)?,
        })
    }

    /// Resolve a handle such as `ada.bsky.social` to its DID
    pub async fn resolve_handle(&self, handle: &str) -> Result<Did> {
        tracing::debug!("Resolving handle: {}", handle);

        let output: ResolveHandleOutput = self
            .xrpc
            .query(RESOLVE_HANDLE, &[("handle", handle)], None)
            .await?;

        Ok(Did::new(&output.did))
    }

    /// Exchange a DID and app password for an access token
    pub async fn get_access_token(&self, did: &Did, app_password: &SecretString) -> Result<SecretString> {
        tracing::debug!("Creating session for {}", did);

        let input = CreateSessionInput {
            identifier: did.as_str(),
            password: app_password.expose_secret(),
        };
        let output: CreateSessionOutput = self.xrpc.procedure(CREATE_SESSION, &input, None).await?;

        Ok(SecretString::from(output.access_jwt))
    }

    /// Fetch up to `limit` feed entries and keep the author's original posts
    ///
    /// Replies and reposts are dropped after the fetch, so the result may be
    /// shorter than `limit`. Upstream order is preserved.
    pub async fn get_posts(&self, access_token: &SecretString, did: &Did, limit: u32) -> Result<Vec<FeedItem>> {
        let limit = limit.to_string();
        let feed: AuthorFeed = self
            .xrpc
            .query(
                GET_AUTHOR_FEED,
                &[("actor", did.as_str()), ("limit", limit.as_str())],
                Some(access_token),
            )
            .await?;

        let fetched = feed.feed.len();
        let posts: Vec<FeedItem> = feed
            .feed
            .into_iter()
            .filter(FeedViewPost::is_original_post)
            .map(FeedItem::from)
            .collect();

        tracing::debug!("Kept {} of {} feed entries", posts.len(), fetched);
        Ok(posts)
    }

    /// Fetch the profile of an account
    pub async fn get_profile(&self, access_token: &SecretString, did: &Did) -> Result<Profile> {
        self.xrpc
            .query(GET_PROFILE, &[("actor", did.as_str())], Some(access_token))
            .await
    }

    /// Publish a text post and return the created record's URI and CID
    pub async fn create_post(&self, access_token: &SecretString, did: &Did, text: &str) -> Result<CreatedRecord> {
        tracing::debug!("Posting to Bluesky: {} characters", text.chars().count());

        let input = CreateRecordInput {
            collection: POST_COLLECTION,
            repo: did.as_str(),
            record: NewPost {
                text,
                created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                record_type: POST_COLLECTION,
            },
        };

        let record: CreatedRecord = self
            .xrpc
            .procedure(CREATE_RECORD, &input, Some(access_token))
            .await?;

        tracing::debug!("Posted to Bluesky: {}", record.uri);
        Ok(record)
    }
}
