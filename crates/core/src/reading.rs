//! A single sensor reading taken from the most recent feed entry.

use crate::types::Timestamp;

/// Pen presence and storage temperature as reported by the sensor board.
///
/// Only `presence` and `temperature` take part in evaluation. The feed
/// metadata is carried along for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// `0` means the pen is absent. Any other value counts as present.
    pub presence: i64,
    /// Degrees Celsius, exactly as parsed. Not checked for finiteness.
    pub temperature: f64,
    /// Provider-assigned sequence number of the feed entry.
    pub entry_id: Option<u64>,
    /// When the provider recorded the entry.
    pub recorded_at: Option<Timestamp>,
}

impl Reading {
    /// Build a reading without feed metadata.
    pub fn new(presence: i64, temperature: f64) -> Self {
        Self {
            presence,
            temperature,
            entry_id: None,
            recorded_at: None,
        }
    }

    pub fn pen_present(&self) -> bool {
        self.presence != 0
    }
}
