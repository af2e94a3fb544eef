//! Data models for the farm telemetry service.
//!
//! Persisted state is a single append-only log of [`SensorReading`] rows.
//! Everything else here (`RollingAverage`, `TimeBucket`, `LivenessState`,
//! `Alert`) is derived per request by the engine and never written back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ---

/// One persisted sensor sample. Immutable once inserted; `id` and
/// `created_at` are store-assigned.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SensorReading {
    // ---
    pub id: i64,
    pub temperature: f32,
    pub humidity: f32,
    pub mq2_value: i32,
    pub created_at: DateTime<Utc>,
}

/// A validated reading on its way into the store.
///
/// Construction is the ingestion path's validation gate: malformed values
/// fail with [`ApiError::Validation`] before any write is attempted.
#[derive(Debug)]
pub struct NewReading {
    // ---
    pub temperature: f32,
    pub humidity: f32,
    pub mq2_value: i32,
}

impl NewReading {
    pub fn new(temperature: f32, humidity: f32, gas: i32) -> Result<Self, ApiError> {
        // ---
        if !temperature.is_finite() {
            return Err(ApiError::Validation(format!(
                "temperature must be a finite number, got {temperature}"
            )));
        }
        if !humidity.is_finite() {
            return Err(ApiError::Validation(format!(
                "humidity must be a finite number, got {humidity}"
            )));
        }
        if gas < 0 {
            return Err(ApiError::Validation(format!(
                "gas level must be non-negative, got {gas}"
            )));
        }

        Ok(NewReading {
            temperature,
            humidity,
            mq2_value: gas,
        })
    }
}

// ---

/// Mean of each metric over the most recent readings in insertion order.
/// Temperature and humidity carry one decimal place, gas is a whole number.
#[derive(Debug, Serialize, PartialEq)]
pub struct RollingAverage {
    // ---
    pub avg_temp: f32,
    pub avg_humid: f32,
    pub avg_mq2: f32,
}

/// One fixed-width slice of the trailing 24-hour chart window.
///
/// `time_slot` is `HH:MM` with the minute floored to the bucket width; it
/// deliberately does not encode the date. Slots with no readings report
/// `None` (JSON `null`), never zero, so quiet periods do not drag the
/// chart toward the axis.
#[derive(Debug, Serialize, PartialEq)]
pub struct TimeBucket {
    // ---
    pub time_slot: String,
    pub temp: Option<f32>,
    pub humid: Option<f32>,
}

/// Liveness verdict derived from the most recent reading and "now".
#[derive(Debug, Serialize)]
pub struct LivenessState {
    // ---
    pub stale: bool,
    pub last_observed_at: Option<DateTime<Utc>>,
}

// ---

/// Alert severity, ordered least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// The metric an alert is about. `Liveness` is synthetic (no sensor channel
/// behind it) and `Nominal` marks the all-clear summary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Temperature,
    Humidity,
    Gas,
    Liveness,
    #[serde(rename = "none")]
    Nominal,
}

impl Metric {
    /// Fixed display priority used as the truncation tie-break
    /// (lower sorts first).
    pub fn display_priority(self) -> u8 {
        // ---
        match self {
            Metric::Liveness => 0,
            Metric::Temperature => 1,
            Metric::Humidity => 2,
            Metric::Gas => 3,
            Metric::Nominal => 4,
        }
    }
}

/// One entry in the dashboard's alert panel. Recomputed from scratch on
/// every classification call; there is no alert history.
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    // ---
    pub metric: Metric,
    pub severity: Severity,
    pub message: String,
}
