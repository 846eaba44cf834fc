//! `penwatch-bridge` library crate.
//!
//! Wires the ThingSpeak reader and the Firestore writer together for a
//! single sync run. The binary entrypoint lives in `main.rs`.

pub mod config;
pub mod error;
pub mod logging;
pub mod sync;

use chrono::Utc;

use penwatch_firestore::{Auth, FirestoreClient, ServiceAccountKey, DEFAULT_BASE_URL};
use penwatch_thingspeak::ThingSpeakClient;

pub use config::BridgeConfig;
pub use error::BridgeError;
pub use sync::{sync_once, AlertSink, FeedSource, SyncReport, WrittenAlert};

/// Build the feed client described by `config`.
pub fn build_feed(config: &BridgeConfig) -> Result<ThingSpeakClient, BridgeError> {
    Ok(ThingSpeakClient::new(
        config.thingspeak_base_url.clone(),
        config.channel_id.clone(),
        config.read_key.clone(),
        config.http_timeout,
    )?)
}

/// Build the alert store described by `config`.
///
/// The key file is read here, once. In emulator mode it is only consulted
/// when no project ID was configured.
pub fn build_store(config: &BridgeConfig) -> Result<FirestoreClient, BridgeError> {
    if let Some(host) = config.emulator_host.as_deref() {
        let project_id = match config.project_id.clone() {
            Some(project_id) => project_id,
            None => ServiceAccountKey::from_file(&config.credentials_path)?.project_id,
        };
        tracing::info!(host, project_id = %project_id, "Using Firestore emulator");
        return Ok(FirestoreClient::emulator(
            host,
            project_id,
            config.database.clone(),
            config.http_timeout,
        )?);
    }

    let key = ServiceAccountKey::from_file(&config.credentials_path)?;
    tracing::debug!(client_email = %key.client_email, "Loaded service account key");
    let project_id = config
        .project_id
        .clone()
        .unwrap_or_else(|| key.project_id.clone());

    Ok(FirestoreClient::new(
        DEFAULT_BASE_URL,
        project_id,
        config.database.clone(),
        Auth::ServiceAccount(key),
        config.http_timeout,
    )?)
}

/// Run one sync cycle with clients built from `config`.
///
/// Both clients are owned by this call and dropped when it returns,
/// whichever way it returns.
pub async fn run(config: &BridgeConfig) -> Result<SyncReport, BridgeError> {
    let feed = build_feed(config)?;
    let store = build_store(config)?;

    tracing::info!(
        channel_id = %feed.channel_id(),
        project_id = %store.project_id(),
        "Starting sync",
    );

    sync_once(&feed, &store, Utc::now()).await
}
