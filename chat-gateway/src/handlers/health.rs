use axum::Json;

use crate::models::HealthResponse;

/// Liveness check. Always 200 while the process can serve HTTP.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
