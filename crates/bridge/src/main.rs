//! `penwatch-bridge` -- one-shot insulin pen alert sync.
//!
//! Reads the latest pen-presence / temperature entry from a ThingSpeak
//! channel and appends an alert document to the Firestore `alerts`
//! collection for each violated threshold. Runs exactly once and exits;
//! schedule it with cron or a systemd timer.
//!
//! See [`BridgeConfig::from_env`] for the environment variables.

use penwatch_bridge::{logging, BridgeConfig, BridgeError};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init();

    let config = BridgeConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    match penwatch_bridge::run(&config).await {
        Ok(report) => {
            tracing::info!(
                entry_id = ?report.reading.entry_id,
                alerts_written = report.written.len(),
                "Sync complete",
            );
        }
        // Already logged where the write failed.
        Err(BridgeError::Write { .. }) => std::process::exit(1),
        Err(e) => {
            tracing::error!(error = %e, "Sync failed");
            std::process::exit(1);
        }
    }
}
