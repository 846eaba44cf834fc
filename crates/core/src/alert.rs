//! Alert records raised when a reading violates a threshold.

use crate::types::Timestamp;

/// Collection that alert documents are appended to.
pub const ALERTS_COLLECTION: &str = "alerts";

/// What kind of violation an alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// The pen was not detected in its holder.
    PenAbsent,
    /// Storage temperature left the safe band.
    Temperature,
}

impl AlertKind {
    /// Wire name stored in the `type` field of the alert document.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PenAbsent => "pen_absent",
            Self::Temperature => "temperature",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A threshold violation ready to be persisted.
///
/// The store encodes `kind` under the document field `type`.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub timestamp: Timestamp,
}

impl Alert {
    pub fn new(kind: AlertKind, message: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            kind,
            message: message.into(),
            timestamp,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
