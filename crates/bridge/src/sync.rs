//! One fetch → evaluate → write cycle.
//!
//! The feed and the alert store are passed in as [`FeedSource`] and
//! [`AlertSink`] so the cycle can run against in-memory doubles in tests.

use penwatch_core::types::Timestamp;
use penwatch_core::{evaluate, Alert, AlertKind, Reading};
use penwatch_firestore::{FirestoreClient, StoreError};
use penwatch_thingspeak::{FeedError, ThingSpeakClient};

use crate::error::BridgeError;

/// Source of the latest sensor reading.
pub trait FeedSource: Send + Sync {
    fn fetch_reading(&self) -> impl std::future::Future<Output = Result<Reading, FeedError>> + Send;
}

/// Destination for alert records. Returns the stored document ID.
pub trait AlertSink: Send + Sync {
    fn write_alert(
        &self,
        alert: &Alert,
    ) -> impl std::future::Future<Output = Result<String, StoreError>> + Send;
}

impl FeedSource for ThingSpeakClient {
    async fn fetch_reading(&self) -> Result<Reading, FeedError> {
        self.fetch_latest().await
    }
}

impl AlertSink for FirestoreClient {
    async fn write_alert(&self, alert: &Alert) -> Result<String, StoreError> {
        self.add_alert(alert).await
    }
}

/// An alert that made it into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenAlert {
    pub kind: AlertKind,
    pub document_id: String,
}

/// Outcome of a successful cycle.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub reading: Reading,
    pub written: Vec<WrittenAlert>,
}

/// Fetch one reading, evaluate it at `now`, and write every resulting alert.
///
/// A fetch failure returns before anything is written. Writes happen in
/// order and stop at the first failure; earlier writes are not undone and
/// are counted in [`BridgeError::Write`]. That failure is logged here.
pub async fn sync_once<F, S>(feed: &F, sink: &S, now: Timestamp) -> Result<SyncReport, BridgeError>
where
    F: FeedSource,
    S: AlertSink,
{
    let reading = feed.fetch_reading().await?;
    let alerts = evaluate(&reading, now);

    if alerts.is_empty() {
        tracing::info!(
            presence = reading.presence,
            temperature = reading.temperature,
            "Reading within limits",
        );
    }

    let mut written = Vec::with_capacity(alerts.len());
    for alert in &alerts {
        match sink.write_alert(alert).await {
            Ok(document_id) => written.push(WrittenAlert {
                kind: alert.kind,
                document_id,
            }),
            Err(e) => {
                tracing::error!(
                    kind = %alert.kind,
                    already_written = written.len(),
                    error = %e,
                    "Alert write failed",
                );
                return Err(BridgeError::Write {
                    written: written.len(),
                    source: e,
                });
            }
        }
    }

    Ok(SyncReport { reading, written })
}
