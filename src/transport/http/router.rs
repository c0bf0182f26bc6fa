use crate::domain::{NewSlot, ParkingSlot, SlotRequirements};
use crate::transport::http::handlers::{health, pages, slots};
use crate::transport::http::types::{
    ApiResponse, AppState, HealthResponse, ParkResponse, ReleaseResponse,
};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        slots::list_slots_handler,
        slots::get_slot_handler,
        slots::create_slot_handler,
        slots::park_handler,
        slots::release_slot_handler
    ),
    components(schemas(
        ApiResponse,
        HealthResponse,
        ParkingSlot,
        NewSlot,
        SlotRequirements,
        ParkResponse,
        ReleaseResponse
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        // Operator pages
        .route("/", get(pages::index_handler))
        .route(
            "/add",
            get(pages::add_slot_form_handler).post(pages::add_slot_handler),
        )
        .route(
            "/park",
            get(pages::park_form_handler).post(pages::park_handler),
        )
        .route("/remove/:slot_no", get(pages::remove_vehicle_handler))
        // JSON API
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/slots",
            get(slots::list_slots_handler).post(slots::create_slot_handler),
        )
        .route("/api/slots/:slot_no", get(slots::get_slot_handler))
        .route(
            "/api/slots/:slot_no/release",
            post(slots::release_slot_handler),
        )
        .route("/api/park", post(slots::park_handler))
        .with_state(app_state)
}
