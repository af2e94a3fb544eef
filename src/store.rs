//! Reading Store access: thin sqlx wrappers over the append-only
//! `sensor_data` log.
//!
//! Every function is one awaited query with no partial-result handling;
//! failures bubble up as `sqlx::Error` and become `ApiError::Store` at
//! the route boundary. Keeping SQL here leaves the engine modules pure
//! and unit-testable without a database.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::{NewReading, SensorReading};

// ---

const READING_COLUMNS: &str = "id, temperature, humidity, mq2_value, created_at";

/// Append one validated reading. `id` and `created_at` are assigned by
/// the store.
pub async fn insert_reading(pool: &PgPool, reading: &NewReading) -> Result<(), sqlx::Error> {
    // ---
    sqlx::query(
        r#"
        INSERT INTO sensor_data (temperature, humidity, mq2_value)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(reading.temperature)
    .bind(reading.humidity)
    .bind(reading.mq2_value)
    .execute(pool)
    .await?;

    Ok(())
}

/// The `limit` most recent readings by insertion (id) order, newest
/// first. Feeds the rolling average.
pub async fn recent_readings(pool: &PgPool, limit: i64) -> Result<Vec<SensorReading>, sqlx::Error> {
    // ---
    sqlx::query_as::<_, SensorReading>(&format!(
        "SELECT {READING_COLUMNS} FROM sensor_data ORDER BY id DESC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// All readings observed at or after `cutoff`, oldest first. Feeds the
/// bucketed history.
pub async fn readings_since(
    pool: &PgPool,
    cutoff: DateTime<Utc>,
) -> Result<Vec<SensorReading>, sqlx::Error> {
    // ---
    sqlx::query_as::<_, SensorReading>(&format!(
        "SELECT {READING_COLUMNS} FROM sensor_data WHERE created_at >= $1 ORDER BY created_at ASC"
    ))
    .bind(cutoff)
    .fetch_all(pool)
    .await
}

/// The single most recent reading by observation time, if any exist.
pub async fn latest_reading(pool: &PgPool) -> Result<Option<SensorReading>, sqlx::Error> {
    // ---
    sqlx::query_as::<_, SensorReading>(&format!(
        "SELECT {READING_COLUMNS} FROM sensor_data ORDER BY created_at DESC, id DESC LIMIT 1"
    ))
    .fetch_optional(pool)
    .await
}

/// The full reading log, newest first (client-side chart fallbacks).
pub async fn all_readings(pool: &PgPool) -> Result<Vec<SensorReading>, sqlx::Error> {
    // ---
    sqlx::query_as::<_, SensorReading>(&format!(
        "SELECT {READING_COLUMNS} FROM sensor_data ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await
}
