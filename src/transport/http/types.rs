use crate::app::ParkingService;
use crate::domain::ParkingSlot;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub parking: Arc<ParkingService>,
}

impl AppState {
    pub fn new(parking: ParkingService) -> Self {
        Self {
            parking: Arc::new(parking),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `POST /add`. Checkboxes only send a value (`on`) when ticked.
#[derive(Deserialize, Debug, Default)]
pub struct AddSlotForm {
    #[serde(rename = "slotNo", default)]
    pub slot_no: String,
    #[serde(rename = "isCovered")]
    pub is_covered: Option<String>,
    #[serde(rename = "isEVCharging")]
    pub is_ev_charging: Option<String>,
}

/// Body of `POST /park`.
#[derive(Deserialize, Debug, Default)]
pub struct ParkForm {
    #[serde(rename = "needsEV")]
    pub needs_ev: Option<String>,
    #[serde(rename = "needsCover")]
    pub needs_cover: Option<String>,
}

/// A checkbox is ticked only when the browser sent exactly `on`.
pub fn checkbox(value: &Option<String>) -> bool {
    value.as_deref() == Some("on")
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ParkResponse {
    pub assigned: bool,
    pub slot: Option<ParkingSlot>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ReleaseResponse {
    pub slot_no: i64,
    /// False when no slot with this number exists (nothing changed).
    pub released: bool,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub total: i64,
    pub free: i64,
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(format!("Invalid JSON body: {} (expected: {})", err, expected)),
        }),
    )
}
