//! Threshold evaluation for pen presence and storage temperature.
//!
//! Pure logic, no network access. The caller fetches the reading and
//! persists whatever alerts come back.

use crate::alert::{Alert, AlertKind};
use crate::reading::Reading;
use crate::types::Timestamp;

/// Lowest safe storage temperature in degrees Celsius (exclusive bound for alerts).
pub const TEMPERATURE_MIN_CELSIUS: f64 = 2.0;

/// Highest safe storage temperature in degrees Celsius (exclusive bound for alerts).
pub const TEMPERATURE_MAX_CELSIUS: f64 = 8.0;

/// Message attached to every pen-absent alert.
pub const PEN_ABSENT_MESSAGE: &str = "Insulin pen missing!";

/// Evaluate a reading and return the alerts it raises.
///
/// The two checks are independent. When both fire, the pen-absent alert
/// comes first. Every alert carries `now` as its timestamp.
pub fn evaluate(reading: &Reading, now: Timestamp) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if !reading.pen_present() {
        alerts.push(Alert::new(AlertKind::PenAbsent, PEN_ABSENT_MESSAGE, now));
    }

    if temperature_out_of_range(reading.temperature) {
        alerts.push(Alert::new(
            AlertKind::Temperature,
            temperature_message(reading.temperature),
            now,
        ));
    }

    alerts
}

/// Strict comparison: the bounds themselves are in range. NaN never alerts.
fn temperature_out_of_range(celsius: f64) -> bool {
    celsius < TEMPERATURE_MIN_CELSIUS || celsius > TEMPERATURE_MAX_CELSIUS
}

/// Build the temperature alert text, e.g. `Temperature Alert: 1.9°C`.
pub fn temperature_message(celsius: f64) -> String {
    format!("Temperature Alert: {}°C", format_celsius(celsius))
}

/// Shortest round-trip rendering, keeping a trailing `.0` on whole values.
fn format_celsius(celsius: f64) -> String {
    if celsius.is_finite() && celsius.fract() == 0.0 {
        format!("{celsius:.1}")
    } else {
        celsius.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
