//! Firestore typed-value encoding for alert documents.

use chrono::SecondsFormat;
use serde_json::{json, Value};

use penwatch_core::Alert;

/// Body for `documents.createDocument`: `{"fields": {...}}`.
pub fn alert_document(alert: &Alert) -> Value {
    json!({
        "fields": {
            "type": { "stringValue": alert.kind.as_str() },
            "message": { "stringValue": alert.message },
            "timestamp": {
                "timestampValue": alert.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
            },
        }
    })
}

/// Server-assigned document ID: the last segment of the resource name.
pub fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}
