//! HTTP client for a single ThingSpeak channel.

use std::time::Duration;

use penwatch_core::Reading;

use crate::error::FeedError;
use crate::feed::parse_feed;

/// Public ThingSpeak API host.
pub const DEFAULT_BASE_URL: &str = "https://api.thingspeak.com";

/// Reads the latest entry of one channel feed.
pub struct ThingSpeakClient {
    client: reqwest::Client,
    base_url: String,
    channel_id: String,
    read_key: String,
}

impl ThingSpeakClient {
    /// Create a client for `channel_id`.
    ///
    /// Requests only time out when `timeout` is given.
    pub fn new(
        base_url: impl Into<String>,
        channel_id: impl Into<String>,
        read_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, FeedError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            channel_id: channel_id.into(),
            read_key: read_key.into(),
        })
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// Endpoint for the channel feed, without the query string.
    pub fn feed_url(&self) -> String {
        format!(
            "{}/channels/{}/feeds.json",
            self.base_url.trim_end_matches('/'),
            self.channel_id
        )
    }

    /// Fetch the most recent feed entry.
    ///
    /// One request, no retry. The read key is sent as a query parameter and
    /// never logged.
    pub async fn fetch_latest(&self) -> Result<Reading, FeedError> {
        let url = self.feed_url();
        tracing::debug!(channel_id = %self.channel_id, "Fetching latest feed entry");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.read_key.as_str()), ("results", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::HttpStatus(response.status().as_u16()));
        }

        let body = response.text().await?;
        let reading = parse_feed(&body)?;

        tracing::info!(
            channel_id = %self.channel_id,
            entry_id = ?reading.entry_id,
            presence = reading.presence,
            temperature = reading.temperature,
            "Fetched reading",
        );

        Ok(reading)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
