//! Wire types for the `feeds.json` endpoint and the typed parse step.
//!
//! `field1` carries pen presence (`"0"` or `"1"`), `field2` the temperature.
//! The provider sends both as strings; plain JSON numbers are accepted too.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use penwatch_core::Reading;

use crate::error::FeedError;

/// Channel field holding pen presence.
pub const PRESENCE_FIELD: &str = "field1";

/// Channel field holding the temperature in degrees Celsius.
pub const TEMPERATURE_FIELD: &str = "field2";

#[derive(Debug, Deserialize)]
struct FeedResponse {
    feeds: Vec<FeedEntry>,
}

#[derive(Debug, Deserialize)]
struct FeedEntry {
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    entry_id: Option<u64>,
    #[serde(default)]
    field1: Option<RawField>,
    #[serde(default)]
    field2: Option<RawField>,
}

/// A channel field value, either a numeric string or a JSON number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawField {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawField {
    /// Integer value; fractional numbers are truncated toward zero.
    fn to_integer(&self, name: &str) -> Result<i64, FeedError> {
        match self {
            Self::Int(n) => Ok(*n),
            Self::Float(f) => Ok(f.trunc() as i64),
            Self::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|e| FeedError::Malformed(format!("{name} is not an integer: {e}"))),
        }
    }

    fn to_float(&self, name: &str) -> Result<f64, FeedError> {
        match self {
            Self::Int(n) => Ok(*n as f64),
            Self::Float(f) => Ok(*f),
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| FeedError::Malformed(format!("{name} is not a number: {e}"))),
        }
    }
}

/// Parse a `feeds.json` body and return the first entry as a [`Reading`].
///
/// Fails with [`FeedError::EmptyFeed`] when there are no entries and with
/// [`FeedError::Malformed`] for anything else that does not fit.
pub fn parse_feed(body: &str) -> Result<Reading, FeedError> {
    let response: FeedResponse =
        serde_json::from_str(body).map_err(|e| FeedError::Malformed(e.to_string()))?;

    let entry = response.feeds.into_iter().next().ok_or(FeedError::EmptyFeed)?;

    let presence =
        require_field(PRESENCE_FIELD, entry.field1.as_ref())?.to_integer(PRESENCE_FIELD)?;
    let temperature =
        require_field(TEMPERATURE_FIELD, entry.field2.as_ref())?.to_float(TEMPERATURE_FIELD)?;

    // Metadata only; an odd timestamp should not fail the run.
    let recorded_at = entry
        .created_at
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));

    Ok(Reading {
        presence,
        temperature,
        entry_id: entry.entry_id,
        recorded_at,
    })
}

fn require_field<'a>(name: &str, value: Option<&'a RawField>) -> Result<&'a RawField, FeedError> {
    value.ok_or_else(|| FeedError::Malformed(format!("{name} is missing")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    #[test]
    fn parses_first_entry() {
        let body = r#"{
            "channel": {"id": 123456, "name": "Insulin cooler"},
            "feeds": [
                {"created_at": "2024-03-01T12:00:00Z", "entry_id": 42, "field1": "1", "field2": "4.5"}
            ]
        }"#;

        let reading = parse_feed(body).expect("feed should parse");

        assert_eq!(reading.presence, 1);
        assert_eq!(reading.temperature, 4.5);
        assert_eq!(reading.entry_id, Some(42));
        assert_eq!(
            reading.recorded_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn only_first_entry_is_used() {
        let body = r#"{"feeds": [
            {"field1": "0", "field2": "9.0"},
            {"field1": "1", "field2": "5.0"}
        ]}"#;

        let reading = parse_feed(body).unwrap();
        assert_eq!(reading.presence, 0);
        assert_eq!(reading.temperature, 9.0);
    }

    #[test]
    fn empty_feeds_is_distinct_error() {
        let body = r#"{"channel": {}, "feeds": []}"#;
        assert_matches!(parse_feed(body), Err(FeedError::EmptyFeed));
    }

    #[test]
    fn missing_field_is_malformed() {
        let body = r#"{"feeds": [{"field1": "1"}]}"#;
        assert_matches!(parse_feed(body), Err(FeedError::Malformed(msg)) if msg.contains("field2"));
    }

    #[test]
    fn null_field_is_malformed() {
        let body = r#"{"feeds": [{"field1": null, "field2": "5"}]}"#;
        assert_matches!(parse_feed(body), Err(FeedError::Malformed(msg)) if msg.contains("field1"));
    }

    #[test]
    fn non_numeric_presence_is_malformed() {
        let body = r#"{"feeds": [{"field1": "yes", "field2": "5"}]}"#;
        assert_matches!(parse_feed(body), Err(FeedError::Malformed(_)));
    }

    #[test]
    fn non_numeric_temperature_is_malformed() {
        let body = r#"{"feeds": [{"field1": "1", "field2": "warm"}]}"#;
        assert_matches!(parse_feed(body), Err(FeedError::Malformed(_)));
    }

    #[test]
    fn rejected_key_body_is_malformed() {
        // ThingSpeak answers a bad read key with a bare `-1`.
        assert_matches!(parse_feed("-1"), Err(FeedError::Malformed(_)));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let body = r#"{"feeds": [{"field1": " 0 ", "field2": " 7.25\r\n"}]}"#;
        let reading = parse_feed(body).unwrap();
        assert_eq!(reading.presence, 0);
        assert_eq!(reading.temperature, 7.25);
    }

    #[test]
    fn numeric_fields_are_accepted() {
        let reading = parse_feed(r#"{"feeds":[{"field1":0,"field2":9.5}]}"#).unwrap();
        assert_eq!(reading.presence, 0);
        assert_eq!(reading.temperature, 9.5);

        let reading = parse_feed(r#"{"feeds":[{"field1":1.0,"field2":4}]}"#).unwrap();
        assert_eq!(reading.presence, 1);
        assert_eq!(reading.temperature, 4.0);
    }

    #[test]
    fn boolean_field_is_malformed() {
        let body = r#"{"feeds": [{"field1": true, "field2": "5"}]}"#;
        assert_matches!(parse_feed(body), Err(FeedError::Malformed(_)));
    }

    #[test]
    fn unparsable_created_at_is_ignored() {
        let body = r#"{"feeds": [{"created_at": "yesterday", "field1": "1", "field2": "5"}]}"#;
        let reading = parse_feed(body).unwrap();
        assert_eq!(reading.recorded_at, None);
    }
}
