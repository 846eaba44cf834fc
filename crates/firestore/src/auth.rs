//! Request authorisation for the Firestore REST API.
//!
//! Production runs use the OAuth 2.0 JWT-bearer grant: an RS256 assertion
//! signed with the service-account key is exchanged at the key's
//! `token_uri` for a short-lived access token. Against the local emulator a
//! fixed bearer token is accepted instead.

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::credentials::ServiceAccountKey;
use crate::error::StoreError;

/// OAuth scope granting read/write access to Firestore.
pub const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";

/// Bearer token the Firestore emulator accepts as an admin.
pub const EMULATOR_TOKEN: &str = "owner";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for the assertion (the maximum Google accepts).
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// How outgoing requests are authorised.
#[derive(Debug, Clone)]
pub enum Auth {
    /// Exchange a signed assertion for an access token.
    ServiceAccount(ServiceAccountKey),
    /// Talk to the emulator with [`EMULATOR_TOKEN`].
    Emulator,
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Sign the JWT-bearer assertion for `key`, issued at `now`.
pub fn sign_assertion(key: &ServiceAccountKey, now: DateTime<Utc>) -> Result<String, StoreError> {
    let iat = now.timestamp();
    let claims = Claims {
        iss: &key.client_email,
        scope: DATASTORE_SCOPE,
        aud: &key.token_uri,
        iat,
        exp: iat + ASSERTION_LIFETIME_SECS,
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    Ok(encode(&header, &claims, &encoding_key)?)
}

/// Exchange a freshly signed assertion for an access token.
pub async fn fetch_access_token(
    client: &reqwest::Client,
    key: &ServiceAccountKey,
) -> Result<String, StoreError> {
    let assertion = sign_assertion(key, Utc::now())?;
    let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];

    tracing::debug!(client_email = %key.client_email, "Requesting access token");
    let response = client.post(&key.token_uri).form(&params).send().await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(StoreError::Token(format!("HTTP {status}: {body}")));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| StoreError::Token(format!("unexpected token response: {e}")))?;

    Ok(token.access_token)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
