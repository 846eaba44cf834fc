use penwatch_firestore::StoreError;
use penwatch_thingspeak::FeedError;

use crate::config::ConfigError;

/// Anything that ends a sync run early.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Feed fetch failed: {0}")]
    Feed(#[from] FeedError),

    #[error("Alert store setup failed: {0}")]
    Store(#[from] StoreError),

    /// A write failed mid-run after `written` alerts were already stored.
    #[error("Alert write failed after {written} stored: {source}")]
    Write {
        written: usize,
        #[source]
        source: StoreError,
    },
}
