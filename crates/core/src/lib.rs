//! Domain types and threshold evaluation for the insulin pen monitor.
//!
//! Pure logic, no I/O. The feed fetcher produces a [`Reading`], the
//! evaluator turns it into zero or more [`Alert`]s, and the alert writer
//! persists them.

pub mod alert;
pub mod reading;
pub mod thresholds;
pub mod types;

pub use alert::{Alert, AlertKind};
pub use reading::Reading;
pub use thresholds::evaluate;
