//! Liveness plus a lot summary: the check goes through the slot store, so a
//! missing table or broken database reports unhealthy.

use crate::transport::http::handlers::common::api_ok;
use crate::transport::http::types::{ApiResponse, AppState, HealthResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Slot store readable; includes slot totals", body = ApiResponse),
        (status = 503, description = "Slot store unreadable", body = ApiResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> Response {
    match state.parking.counts().await {
        Ok(counts) => api_ok(
            StatusCode::OK,
            HealthResponse {
                status: "ok".to_string(),
                total: counts.total,
                free: counts.free,
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    success: false,
                    data: Some(serde_json::json!({ "status": "unhealthy" })),
                    error: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}
