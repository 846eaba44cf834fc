//! Google service-account key file.

use std::path::Path;

use serde::Deserialize;

use crate::error::StoreError;

/// Token endpoint used when the key file does not name one.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const SERVICE_ACCOUNT_TYPE: &str = "service_account";

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a service-account JSON key that token minting needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    pub project_id: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    pub private_key: String,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountKey {
    /// Read and parse a key file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::CredentialsIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse a key from its JSON text.
    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        let key: Self =
            serde_json::from_str(raw).map_err(|e| StoreError::Credentials(e.to_string()))?;

        if let Some(key_type) = key.key_type.as_deref() {
            if key_type != SERVICE_ACCOUNT_TYPE {
                return Err(StoreError::Credentials(format!(
                    "expected key type '{SERVICE_ACCOUNT_TYPE}', got '{key_type}'"
                )));
            }
        }
        if key.client_email.trim().is_empty() {
            return Err(StoreError::Credentials("client_email is empty".into()));
        }
        if key.private_key.trim().is_empty() {
            return Err(StoreError::Credentials("private_key is empty".into()));
        }

        Ok(key)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
