//! `/sensor/*` endpoints: the HTTP face of the telemetry engine.
//!
//! Write path: `POST /sensor/insert` validates, appends to the reading
//! log, and answers with the rolling average (the only operation with a
//! side effect). Read path: `latest`, `hourly`, `all`, and `status` each
//! fetch a fresh snapshot from the store and derive their answer per
//! request; nothing is cached across calls, so concurrent polling needs
//! no locking and a restart loses nothing.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, info};

use crate::engine::{alerts, history, smoothing, staleness};
use crate::{store, ApiError, Config};
use crate::{Alert, NewReading, RollingAverage, SensorReading, TimeBucket};

// ---

pub fn router() -> Router<(PgPool, Config)> {
    // ---
    Router::new()
        .route("/sensor/insert", post(insert))
        .route("/sensor/latest", get(latest))
        .route("/sensor/hourly", get(hourly))
        .route("/sensor/all", get(all))
        .route("/sensor/status", get(status))
}

/// Query parameters for `POST /sensor/insert`, as sent by the sensor
/// client firmware.
#[derive(Debug, Deserialize)]
struct InsertParams {
    temperature: f32,
    humidity: f32,
    gas: i32,
}

/// Liveness verdict plus the current alert panel.
#[derive(Debug, Serialize)]
struct StatusResponse {
    stale: bool,
    last_observed_at: Option<chrono::DateTime<Utc>>,
    alerts: Vec<Alert>,
}

// ---

/// `POST /sensor/insert` — append one reading, answer with the mean of
/// the last ten by insertion order (including the one just written).
async fn insert(
    Query(params): Query<InsertParams>,
    State((pool, _config)): State<(PgPool, Config)>,
) -> Result<Json<RollingAverage>, ApiError> {
    // ---
    debug!("POST /sensor/insert - {:?}", params);

    let reading = NewReading::new(params.temperature, params.humidity, params.gas)?;
    store::insert_reading(&pool, &reading).await?;

    let recent = store::recent_readings(&pool, smoothing::SMOOTHING_WINDOW as i64).await?;
    let avg = smoothing::rolling_average(&recent);

    info!(
        "Inserted reading (temp {:.1}, humid {:.1}, gas {}); window of {} averages to {:?}",
        reading.temperature,
        reading.humidity,
        reading.mq2_value,
        recent.len(),
        avg
    );
    Ok(Json(avg))
}

/// `GET /sensor/latest` — the most recent reading, or 404 while the log
/// is empty.
async fn latest(
    State((pool, _config)): State<(PgPool, Config)>,
) -> Result<Json<SensorReading>, ApiError> {
    // ---
    store::latest_reading(&pool)
        .await?
        .map(Json)
        .ok_or(ApiError::EmptyStore)
}

/// `GET /sensor/hourly` — the trailing-24h chart grid: 48 half-hour
/// buckets, ascending, with null means where no readings landed.
async fn hourly(
    State((pool, _config)): State<(PgPool, Config)>,
) -> Result<Json<Vec<TimeBucket>>, ApiError> {
    // ---
    let cutoff = Utc::now() - Duration::hours(history::HISTORY_WINDOW_HOURS);
    let readings = store::readings_since(&pool, cutoff).await?;

    debug!(
        "GET /sensor/hourly - bucketing {} readings since {}",
        readings.len(),
        cutoff
    );
    Ok(Json(history::bucketed_history(
        &readings,
        history::BUCKET_WIDTH_MIN,
    )))
}

/// `GET /sensor/all` — the full reading log, newest first.
async fn all(
    State((pool, _config)): State<(PgPool, Config)>,
) -> Result<Json<Vec<SensorReading>>, ApiError> {
    // ---
    let readings = store::all_readings(&pool).await?;
    debug!("GET /sensor/all - returning {} readings", readings.len());
    Ok(Json(readings))
}

/// `GET /sensor/status` — server-side liveness check plus alert
/// classification of the latest reading, identical in semantics to the
/// dashboard's former client-side computation.
///
/// An empty log is not an error here: it reports `stale: true` with a
/// "never reported" alert, which is how the dashboard distinguishes "no
/// data yet" from "sensor stopped" and from a store failure (503).
async fn status(
    State((pool, _config)): State<(PgPool, Config)>,
) -> Result<Json<StatusResponse>, ApiError> {
    // ---
    let latest = store::latest_reading(&pool).await?;
    let now = Utc::now();

    let liveness = staleness::liveness(latest.as_ref().map(|r| r.created_at), now);

    let mut panel = match &latest {
        Some(reading) => alerts::classify(reading),
        None => Vec::new(),
    };
    if liveness.stale {
        panel.insert(0, alerts::liveness_alert(&liveness));
    }
    let panel = alerts::truncate_for_display(panel, alerts::DISPLAY_LIMIT);

    info!(
        "GET /sensor/status - stale={}, {} alert(s)",
        liveness.stale,
        panel.len()
    );
    Ok(Json(StatusResponse {
        stale: liveness.stale,
        last_observed_at: liveness.last_observed_at,
        alerts: panel,
    }))
}
