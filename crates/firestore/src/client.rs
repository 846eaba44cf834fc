//! Firestore REST client for appending documents.

use std::time::Duration;

use serde::Deserialize;
use tokio::sync::OnceCell;

use penwatch_core::alert::ALERTS_COLLECTION;
use penwatch_core::Alert;

use crate::auth::{self, Auth, EMULATOR_TOKEN};
use crate::document::{alert_document, document_id};
use crate::error::StoreError;

/// Public Firestore REST host.
pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com";

/// Database every project gets by default.
pub const DEFAULT_DATABASE: &str = "(default)";

#[derive(Debug, Deserialize)]
struct CreatedDocument {
    name: String,
}

/// Appends documents to collections of one Firestore database.
///
/// The access token is requested on the first write and reused for the
/// lifetime of the client, so a run that writes nothing never talks to the
/// token endpoint.
pub struct FirestoreClient {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    database: String,
    auth: Auth,
    access_token: OnceCell<String>,
}

impl FirestoreClient {
    /// Requests only time out when `timeout` is given.
    pub fn new(
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        database: impl Into<String>,
        auth: Auth,
        timeout: Option<Duration>,
    ) -> Result<Self, StoreError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            project_id: project_id.into(),
            database: database.into(),
            auth,
            access_token: OnceCell::new(),
        })
    }

    /// Client for a local emulator listening on `host` (e.g. `localhost:8080`).
    pub fn emulator(
        host: &str,
        project_id: impl Into<String>,
        database: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, StoreError> {
        Self::new(format!("http://{host}"), project_id, database, Auth::Emulator, timeout)
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// REST endpoint of `collection`.
    pub fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/v1/projects/{}/databases/{}/documents/{}",
            self.base_url.trim_end_matches('/'),
            self.project_id,
            self.database,
            collection
        )
    }

    /// Persist an alert in the `alerts` collection and return the new document ID.
    pub async fn add_alert(&self, alert: &Alert) -> Result<String, StoreError> {
        let id = self
            .add_document(ALERTS_COLLECTION, &alert_document(alert))
            .await?;
        tracing::info!(kind = %alert.kind, document_id = %id, "Alert written");
        Ok(id)
    }

    /// Create a document with a server-assigned ID.
    pub async fn add_document(
        &self,
        collection: &str,
        body: &serde_json::Value,
    ) -> Result<String, StoreError> {
        let token = self.bearer_token().await?;

        let response = self
            .client
            .post(self.collection_url(collection))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::HttpStatus { status, body });
        }

        let created: CreatedDocument = response.json().await?;
        Ok(document_id(&created.name).to_string())
    }

    async fn bearer_token(&self) -> Result<&str, StoreError> {
        match &self.auth {
            Auth::Emulator => Ok(EMULATOR_TOKEN),
            Auth::ServiceAccount(key) => self
                .access_token
                .get_or_try_init(|| auth::fetch_access_token(&self.client, key))
                .await
                .map(String::as_str),
        }
    }
}
