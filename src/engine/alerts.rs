//! Alert classifier: turns the latest reading into the dashboard's alert
//! panel.
//!
//! Thresholds live in a declarative band table evaluated in order, so the
//! numbers can be retuned per deployment (and unit-tested) without
//! touching the control flow. Bands for one metric are disjoint by
//! evaluation order: the first matching band wins and no metric ever
//! produces two alerts. A reading with every metric in its comfortable
//! range yields exactly one "all sensors nominal" entry; callers never see
//! an empty list.

use std::cmp::Reverse;

use crate::models::{Alert, LivenessState, Metric, SensorReading, Severity};

// ---

/// Most alerts the dashboard panel will show at once.
pub const DISPLAY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy)]
enum CompareOp {
    GreaterThan,
    GreaterEqual,
    LessThan,
}

impl CompareOp {
    fn check(self, value: f64, threshold: f64) -> bool {
        // ---
        match self {
            CompareOp::GreaterThan => value > threshold,
            CompareOp::GreaterEqual => value >= threshold,
            CompareOp::LessThan => value < threshold,
        }
    }
}

/// One row of the threshold table.
struct Band {
    metric: Metric,
    op: CompareOp,
    threshold: f64,
    severity: Severity,
    label: &'static str,
}

/// Threshold bands, evaluated top to bottom with first-match-wins per
/// metric. Within a metric the more extreme band comes first, so e.g. a
/// gas level of 1200 classifies as critical, never as merely poor.
///
/// Comfortable ranges carry no band at all: temperature 20–35 °C,
/// humidity 40–70 %RH, gas below 600.
const BANDS: &[Band] = &[
    Band {
        metric: Metric::Temperature,
        op: CompareOp::GreaterThan,
        threshold: 35.0,
        severity: Severity::Warning,
        label: "High temperature detected",
    },
    Band {
        metric: Metric::Temperature,
        op: CompareOp::LessThan,
        threshold: 20.0,
        severity: Severity::Warning,
        label: "Low temperature detected",
    },
    Band {
        metric: Metric::Humidity,
        op: CompareOp::GreaterThan,
        threshold: 70.0,
        severity: Severity::Warning,
        label: "High humidity detected",
    },
    Band {
        metric: Metric::Humidity,
        op: CompareOp::LessThan,
        threshold: 40.0,
        severity: Severity::Warning,
        label: "Low humidity detected",
    },
    Band {
        metric: Metric::Gas,
        op: CompareOp::GreaterThan,
        threshold: 1000.0,
        severity: Severity::Critical,
        label: "Critical gas level detected",
    },
    Band {
        metric: Metric::Gas,
        op: CompareOp::GreaterEqual,
        threshold: 600.0,
        severity: Severity::Warning,
        label: "Poor air quality detected",
    },
];

// ---

fn metric_value(reading: &SensorReading, metric: Metric) -> Option<f64> {
    // ---
    match metric {
        Metric::Temperature => Some(f64::from(reading.temperature)),
        Metric::Humidity => Some(f64::from(reading.humidity)),
        Metric::Gas => Some(f64::from(reading.mq2_value)),
        Metric::Liveness | Metric::Nominal => None,
    }
}

fn current_value(reading: &SensorReading, metric: Metric) -> String {
    // ---
    match metric {
        Metric::Temperature => format!("{:.1}\u{b0}C", reading.temperature),
        Metric::Humidity => format!("{:.1}%", reading.humidity),
        _ => reading.mq2_value.to_string(),
    }
}

/// Evaluate every band against the reading, at most one alert per metric.
/// All metrics in-band collapses to a single nominal Info entry
/// summarizing the current values.
pub fn classify(reading: &SensorReading) -> Vec<Alert> {
    // ---
    let mut alerts: Vec<Alert> = Vec::new();

    for band in BANDS {
        if alerts.iter().any(|a| a.metric == band.metric) {
            continue;
        }
        let Some(value) = metric_value(reading, band.metric) else {
            continue;
        };
        if band.op.check(value, band.threshold) {
            alerts.push(Alert {
                metric: band.metric,
                severity: band.severity,
                message: format!(
                    "{} (current: {})",
                    band.label,
                    current_value(reading, band.metric)
                ),
            });
        }
    }

    if alerts.is_empty() {
        alerts.push(Alert {
            metric: Metric::Nominal,
            severity: Severity::Info,
            message: format!(
                "All sensors nominal (temperature {:.1}\u{b0}C, humidity {:.1}%, gas {})",
                reading.temperature, reading.humidity, reading.mq2_value
            ),
        });
    }

    alerts
}

/// Synthetic alert for a sensor that has gone quiet. "Never reported" and
/// "stopped reporting" get distinct messages since they call for
/// different operator action.
pub fn liveness_alert(state: &LivenessState) -> Alert {
    // ---
    let message = match state.last_observed_at {
        Some(last) => format!(
            "Sensor stopped reporting (last reading at {})",
            last.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => "Sensor has never reported a reading".to_string(),
    };

    Alert {
        metric: Metric::Liveness,
        severity: Severity::Warning,
        message,
    }
}

/// Cap the panel at `limit` entries, dropping the lowest severity first;
/// ties break on fixed metric priority (liveness, temperature, humidity,
/// gas). The survivors come back in that same display order.
pub fn truncate_for_display(mut alerts: Vec<Alert>, limit: usize) -> Vec<Alert> {
    // ---
    alerts.sort_by_key(|a| (Reverse(a.severity), a.metric.display_priority()));
    alerts.truncate(limit);
    alerts
}
