//! Telemetry aggregation and alerting engine.
//!
//! Every function in this module tree is a pure function of the readings
//! it is handed plus, where relevant, a caller-supplied "now". Nothing in
//! here touches the database or holds state across calls, so every output
//! reconstructs identically after a restart and is safe to recompute at
//! arbitrary polling frequency.

pub mod alerts;
pub mod history;
pub mod smoothing;
pub mod staleness;

// ---

/// Round to one decimal place, the chart precision for temperature and
/// humidity.
pub(crate) fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
