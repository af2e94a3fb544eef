//! Database schema management for the farm telemetry service.
//!
//! Ensures the reading log and its indexes exist before serving requests.
//! Applied once on startup from `main.rs` (EMBP: single gateway call).

use anyhow::Result;
use sqlx::PgPool;

// ---

/// Create or update the database schema (idempotent).
///
/// Creates the append-only `sensor_data` log served by the `/sensor/*`
/// routes. Safe to call on every startup; no-op if objects already exist.
///
/// Errors are propagated if any SQL execution fails.
pub async fn create_schema(pool: &PgPool) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    // Append-only reading log; id and created_at are store-assigned.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sensor_data (
            id          BIGSERIAL PRIMARY KEY,
            temperature REAL        NOT NULL,
            humidity    REAL        NOT NULL,
            mq2_value   INTEGER     NOT NULL,
            created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Secondary ordering for the read path (latest, trailing-24h window)
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_sensor_data_created_at
            ON sensor_data (created_at);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
