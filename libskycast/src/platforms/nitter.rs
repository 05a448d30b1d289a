//! Nitter (Twitter mirror) RSS scraping
//!
//! Nitter publishes a user's timeline at `{mirror}/{username}/rss`. The
//! channel title reads `"{display name} / @{handle}"` and every item's
//! description is the tweet rendered as HTML. Replies, quotes and retweets
//! are recognized by their title prefix, or by an embedded link pointing back
//! at the mirror itself.

use chrono::{DateTime, SecondsFormat, Utc};
use rss::Channel;
use scraper::{ElementRef, Html};
use url::Url;

use crate::config::HttpConfig;
use crate::error::{FeedError, Result};
use crate::types::Tweet;
use crate::xrpc::{join_path, send};

const QUOTE_PREFIX: &str = "QT by";
const RETWEET_PREFIX: &str = "RT by";

pub struct NitterClient {
    http: reqwest::Client,
    base: Url,
    mirror_host: String,
}

impl NitterClient {
    /// Create a client for the mirror at `api`
    ///
    /// `mirror_host` is the substring that identifies links back to the
    /// mirror; it defaults to the host of `api`.
    pub fn new(api: &str, mirror_host: Option<&str>, config: &HttpConfig) -> Result<Self> {
        let base = Url::parse(api)?;
        let mirror_host = match mirror_host {
            Some(host) => host.to_string(),
            None => base.host_str().unwrap_or_default().to_string(),
        };

        Ok(Self {
            http: config.build_client()?,
            base,
            mirror_host,
        })
    }

    pub fn mirror_host(&self) -> &str {
        &self.mirror_host
    }

    /// URL of the RSS feed for `username`
    pub fn feed_url(&self, username: &str) -> Result<Url> {
        join_path(&self.base, &[username, "rss"])
    }

    /// Fetch the timeline of `username` and return at most `limit` original tweets
    pub async fn get_posts(&self, username: &str, limit: usize) -> Result<Vec<Tweet>> {
        let url = self.feed_url(username)?;
        tracing::debug!("Fetching feed: {}", url);

        let body = send(self.http.get(url)).await?;
        let channel = Channel::read_from(body.as_bytes()).map_err(FeedError::from)?;

        collect_tweets(&channel, &self.mirror_host, limit)
    }
}

/// Pick the author's own tweets out of a parsed Nitter channel, in feed order.
///
/// Scanning stops as soon as `limit` tweets have been accepted and another
/// eligible item comes up; items past that point are never inspected, so a
/// malformed date there does not fail the run.
pub fn collect_tweets(channel: &Channel, mirror_host: &str, limit: usize) -> Result<Vec<Tweet>> {
    let title = channel.title();
    let (display_name, at_handle) = title
        .split_once(" / ")
        .ok_or_else(|| FeedError::Title(title.to_string()))?;
    let handle = at_handle.strip_prefix('@').unwrap_or(at_handle);
    let avatar = channel.image().map(|image| image.url()).unwrap_or_default();

    let reply_prefix = format!("R to {}", at_handle);
    let mut tweets = Vec::new();

    for item in channel.items() {
        let item_title = item.title().unwrap_or_default();
        if item_title.starts_with(&reply_prefix)
            || item_title.starts_with(QUOTE_PREFIX)
            || item_title.starts_with(RETWEET_PREFIX)
        {
            continue;
        }

        let description = item.description().unwrap_or_default();
        if links_to_mirror(description, mirror_host) {
            tracing::debug!("Skipping embedded retweet: {}", item.link().unwrap_or_default());
            continue;
        }

        if tweets.len() >= limit {
            break;
        }

        tweets.push(Tweet {
            url: item.link().unwrap_or_default().to_string(),
            text: description.to_string(),
            created_at: to_iso8601(item.pub_date().unwrap_or_default())?,
            author_handle: handle.to_string(),
            author_display_name: display_name.to_string(),
            author_avatar: avatar.to_string(),
        });
    }

    tracing::debug!("Accepted {} of {} feed items", tweets.len(), channel.items().len());
    Ok(tweets)
}

/// Whether an HTML fragment contains an `<a href>` mentioning `mirror_host`
pub fn links_to_mirror(html: &str, mirror_host: &str) -> bool {
    if mirror_host.is_empty() {
        return false;
    }

    let fragment = Html::parse_fragment(html);
    contains_link(fragment.root_element(), mirror_host)
}

fn contains_link(element: ElementRef<'_>, needle: &str) -> bool {
    let node = element.value();
    if node.name() == "a" && node.attr("href").is_some_and(|href| href.contains(needle)) {
        return true;
    }

    element
        .children()
        .filter_map(ElementRef::wrap)
        .any(|child| contains_link(child, needle))
}

/// Convert an RFC 1123 (RSS `pubDate`) timestamp to ISO 8601 in UTC
pub fn to_iso8601(pub_date: &str) -> Result<String> {
    let parsed = DateTime::parse_from_rfc2822(pub_date).map_err(|source| FeedError::PublishDate {
        value: pub_date.to_string(),
        source,
    })?;

    Ok(parsed
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Secs, true))
}
