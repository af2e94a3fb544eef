use axum::Router;
use sqlx::PgPool;

use crate::Config;

mod health;
mod sensor;

// ---

pub fn router(pool: PgPool, config: Config) -> Router {
    // ---
    Router::new()
        .merge(sensor::router())
        .merge(health::router())
        .with_state((pool, config))
}
