use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use std::{fmt, sync::LazyLock};

pub const TREND_DIGEST_MAX_CHARS: usize = 500;
const HEADLINE_LIMIT: usize = 5;
const NO_HEADLINES_DIGEST: &str = "Cloud-based automotive SaaS solutions";
const UNAVAILABLE_DIGEST: &str = "Cloud-based automotive SaaS solutions, digital transformation in automotive industry, connected vehicle platforms";

static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<title>(?:<!\[CDATA\[(.*?)\]\]>|([^<]*))</title>")
        .expect("title pattern is valid")
});

/// Condensed current headlines. Never empty and never longer than
/// [`TREND_DIGEST_MAX_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrendDigest(String);

impl TrendDigest {
    pub fn new(text: impl AsRef<str>) -> Self {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Self::no_headlines();
        }
        Self(text.chars().take(TREND_DIGEST_MAX_CHARS).collect())
    }

    /// Used when the feed was reachable but carried no usable headline.
    pub fn no_headlines() -> Self {
        Self(NO_HEADLINES_DIGEST.to_string())
    }

    /// Used when the feed could not be fetched at all.
    pub fn unavailable() -> Self {
        Self(UNAVAILABLE_DIGEST.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrendDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of the topical context injected into every prompt.
/// Implementations absorb their own failures.
#[async_trait::async_trait]
pub trait TrendSource: Send + Sync {
    async fn fetch_trends(&self) -> TrendDigest;
}

/// Reads headlines from an RSS search feed.
pub struct FeedTrendSource {
    client: Client,
    feed_url: String,
}

impl FeedTrendSource {
    pub fn new(client: Client, feed_url: impl Into<String>) -> Self {
        Self {
            client,
            feed_url: feed_url.into(),
        }
    }

    async fn fetch_feed(&self) -> Result<String, reqwest::Error> {
        self.client
            .get(&self.feed_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait::async_trait]
impl TrendSource for FeedTrendSource {
    async fn fetch_trends(&self) -> TrendDigest {
        match self.fetch_feed().await {
            Ok(feed) => {
                let headlines = parse_headlines(&feed);
                if headlines.is_empty() {
                    tracing::info!(url = %self.feed_url, "trend feed carried no headlines");
                    TrendDigest::no_headlines()
                } else {
                    tracing::debug!(count = headlines.len(), "fetched trending headlines");
                    TrendDigest::new(headlines.join("\n"))
                }
            }
            Err(error) => {
                tracing::warn!(url = %self.feed_url, %error, "failed to fetch trending topics");
                TrendDigest::unavailable()
            }
        }
    }
}

/// Always returns the same digest.
pub struct StaticTrendSource(TrendDigest);

impl StaticTrendSource {
    pub fn new(digest: TrendDigest) -> Self {
        Self(digest)
    }
}

#[async_trait::async_trait]
impl TrendSource for StaticTrendSource {
    async fn fetch_trends(&self) -> TrendDigest {
        self.0.clone()
    }
}

/// Item titles of an RSS document. The first title belongs to the channel
/// itself and is skipped.
pub fn parse_headlines(feed: &str) -> Vec<String> {
    TITLE_PATTERN
        .captures_iter(feed)
        .skip(1)
        .filter_map(|captures| {
            let title = match (captures.get(1), captures.get(2)) {
                (Some(cdata), _) => cdata.as_str().trim().to_string(),
                (None, Some(plain)) => decode_entities(plain.as_str().trim()),
                (None, None) => return None,
            };
            (!title.is_empty()).then_some(title)
        })
        .take(HEADLINE_LIMIT)
        .collect()
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
