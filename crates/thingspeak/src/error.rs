/// Error type for feed fetch failures.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Feed returned HTTP {0}")]
    HttpStatus(u16),

    /// The body did not have the expected shape or a field was not numeric.
    #[error("Malformed feed: {0}")]
    Malformed(String),

    /// The `feeds` array had no entries.
    #[error("Feed contains no entries")]
    EmptyFeed,
}
