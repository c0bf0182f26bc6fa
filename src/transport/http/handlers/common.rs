use crate::domain::SlotError;
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub fn status_for(err: &SlotError) -> StatusCode {
    match err {
        SlotError::InvalidSlotNumber(_) | SlotError::NonPositiveSlotNumber(_) => {
            StatusCode::BAD_REQUEST
        }
        SlotError::Conflict(_) => StatusCode::CONFLICT,
        SlotError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Storage failures are logged here; validation and conflicts are expected
/// outcomes and are only reported to the caller.
pub fn log_if_storage(err: &SlotError) {
    if let SlotError::Storage(e) = err {
        tracing::error!(error = %e, "slot store request failed");
    }
}

pub fn api_error(err: SlotError) -> Response {
    log_if_storage(&err);
    (
        status_for(&err),
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(err.to_string()),
        }),
    )
        .into_response()
}

pub fn api_ok<T: Serialize>(status: StatusCode, data: T) -> Response {
    match serde_json::to_value(data) {
        Ok(value) => (
            status,
            Json(ApiResponse {
                success: true,
                data: Some(value),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse {
                success: false,
                data: None,
                error: Some(format!("Failed to encode response: {}", e)),
            }),
        )
            .into_response(),
    }
}

/// Text shown on operator pages. Storage details stay in the log.
pub fn page_message(err: &SlotError) -> String {
    match err {
        SlotError::Storage(_) => "Storage error.".to_string(),
        other => other.to_string(),
    }
}
