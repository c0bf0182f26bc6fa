//! JSON API over the same operations as the HTML pages.

use crate::domain::{Allocation, NewSlot, ParkingSlot, SlotRequirements};
use crate::transport::http::handlers::common::{api_error, api_ok};
use crate::transport::http::types::{
    json_422, ApiResponse, AppState, ParkResponse, ReleaseResponse,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/slots",
    responses(
        (status = 200, description = "All slots ordered by slot number", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn list_slots_handler(State(state): State<AppState>) -> Response {
    match state.parking.list_slots().await {
        Ok(slots) => api_ok(StatusCode::OK, slots),
        Err(e) => api_error(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/slots/{slot_no}",
    params(
        ("slot_no" = i64, Path, description = "Slot number")
    ),
    responses(
        (status = 200, description = "The slot", body = ApiResponse),
        (status = 404, description = "No such slot", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn get_slot_handler(
    State(state): State<AppState>,
    Path(slot_no): Path<i64>,
) -> Response {
    match state.parking.find_slot(slot_no).await {
        Ok(Some(slot)) => api_ok(StatusCode::OK, slot),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse {
                success: false,
                data: None,
                error: Some(format!("Slot {} not found", slot_no)),
            }),
        )
            .into_response(),
        Err(e) => api_error(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/slots",
    request_body = NewSlot,
    responses(
        (status = 201, description = "Slot created", body = ApiResponse),
        (status = 400, description = "Slot number is not positive", body = ApiResponse),
        (status = 409, description = "Slot number already registered", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn create_slot_handler(
    State(state): State<AppState>,
    request: Result<Json<NewSlot>, JsonRejection>,
) -> Response {
    let Json(new_slot) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(
                e,
                "{\"slot_no\": <int>, \"is_covered\": <bool>, \"is_ev_charging\": <bool>}",
            )
            .into_response()
        }
    };

    match state.parking.add_slot(new_slot).await {
        Ok(slot) => api_ok(StatusCode::CREATED, slot),
        Err(e) => api_error(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/park",
    request_body = SlotRequirements,
    responses(
        (status = 200, description = "Allocation result (assigned may be false)", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn park_handler(
    State(state): State<AppState>,
    request: Result<Json<SlotRequirements>, JsonRejection>,
) -> Response {
    let Json(requirements) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"needs_ev\": <bool>, \"needs_covered\": <bool>}")
                .into_response()
        }
    };

    match state.parking.park(requirements).await {
        Ok(allocation) => {
            let slot: Option<ParkingSlot> = allocation.slot().copied();
            api_ok(
                StatusCode::OK,
                ParkResponse {
                    assigned: matches!(allocation, Allocation::Assigned(_)),
                    slot,
                },
            )
        }
        Err(e) => api_error(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/slots/{slot_no}/release",
    params(
        ("slot_no" = i64, Path, description = "Slot number")
    ),
    responses(
        (status = 200, description = "Slot is free (released=false if it does not exist)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn release_slot_handler(
    State(state): State<AppState>,
    Path(slot_no): Path<i64>,
) -> Response {
    match state.parking.release(slot_no).await {
        Ok(released) => api_ok(StatusCode::OK, ReleaseResponse { slot_no, released }),
        Err(e) => api_error(e),
    }
}
