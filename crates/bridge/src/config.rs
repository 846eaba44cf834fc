use std::path::PathBuf;
use std::time::Duration;

use penwatch_firestore::DEFAULT_DATABASE;
use penwatch_thingspeak::DEFAULT_BASE_URL as THINGSPEAK_BASE_URL;

/// Key file written by the Firebase console's "Generate new private key".
pub const DEFAULT_CREDENTIALS_PATH: &str = "firebase-adminsdk.json";

/// Error type for configuration problems.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Bridge configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// ThingSpeak channel to read.
    pub channel_id: String,
    /// Read API key of the channel.
    pub read_key: String,
    pub thingspeak_base_url: String,
    /// Service-account key file used to authenticate against Firestore.
    pub credentials_path: PathBuf,
    /// Overrides the project named in the key file.
    pub project_id: Option<String>,
    pub database: String,
    /// `host:port` of a Firestore emulator; when set no token exchange happens.
    pub emulator_host: Option<String>,
    /// Overall timeout for each outgoing HTTP request; unset means none.
    pub http_timeout: Option<Duration>,
}

impl BridgeConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                        |
    /// |---------------------------|--------------------------------|
    /// | `THINGSPEAK_CHANNEL_ID`   | required                       |
    /// | `THINGSPEAK_READ_KEY`     | required                       |
    /// | `THINGSPEAK_BASE_URL`     | `https://api.thingspeak.com`   |
    /// | `FIREBASE_CREDENTIALS`    | `firebase-adminsdk.json`       |
    /// | `FIRESTORE_PROJECT_ID`    | `project_id` of the key file   |
    /// | `FIRESTORE_DATABASE`      | `(default)`                    |
    /// | `FIRESTORE_EMULATOR_HOST` | unset                          |
    /// | `HTTP_TIMEOUT_SECS`       | unset (no timeout)             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let http_timeout = get("HTTP_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .map(Duration::from_secs)
                    .ok_or(ConfigError::Invalid {
                        var: "HTTP_TIMEOUT_SECS",
                        value: raw,
                    })
            })
            .transpose()?;

        Ok(Self {
            channel_id: require("THINGSPEAK_CHANNEL_ID")?,
            read_key: require("THINGSPEAK_READ_KEY")?,
            thingspeak_base_url: get("THINGSPEAK_BASE_URL")
                .unwrap_or_else(|| THINGSPEAK_BASE_URL.into()),
            credentials_path: get("FIREBASE_CREDENTIALS")
                .unwrap_or_else(|| DEFAULT_CREDENTIALS_PATH.into())
                .into(),
            project_id: get("FIRESTORE_PROJECT_ID"),
            database: get("FIRESTORE_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.into()),
            emulator_host: get("FIRESTORE_EMULATOR_HOST"),
            http_timeout,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
