//! ThingSpeak channel feed reader.
//!
//! - [`ThingSpeakClient`] -- fetches the most recent entry of a channel feed.
//! - [`parse_feed`] -- typed parse of a `feeds.json` body into a [`Reading`].
//!
//! [`Reading`]: penwatch_core::Reading

pub mod client;
pub mod error;
pub mod feed;

pub use client::{ThingSpeakClient, DEFAULT_BASE_URL};
pub use error::FeedError;
pub use feed::parse_feed;
