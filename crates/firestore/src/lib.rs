//! Minimal Cloud Firestore writer for alert documents.
//!
//! - [`ServiceAccountKey`] -- the service-account JSON key, loaded once.
//! - [`Auth`] -- how requests are authorised (OAuth token or emulator).
//! - [`FirestoreClient`] -- appends documents with server-assigned IDs.
//! - [`document`] -- Firestore typed-value encoding of an alert.

pub mod auth;
pub mod client;
pub mod credentials;
pub mod document;
pub mod error;

pub use auth::Auth;
pub use client::{FirestoreClient, DEFAULT_BASE_URL, DEFAULT_DATABASE};
pub use credentials::ServiceAccountKey;
pub use error::StoreError;
