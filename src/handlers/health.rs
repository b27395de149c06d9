use crate::schemas::{AppState, HealthResponse};
use axum::{extract::State, response::Json};
use tracing::{instrument, warn};

/// Reports service version and whether the database answers a ping
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up; `database` tells whether the store is reachable", body = HealthResponse)
    )
)]
#[instrument]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.db.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            warn!("Database ping failed: {}", e);
            "disconnected"
        }
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    })
}
