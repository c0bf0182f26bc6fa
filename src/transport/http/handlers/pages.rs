//! HTML form handlers: the operator-facing pages.

use crate::domain::{parse_slot_number, Allocation, NewSlot, SlotError, SlotRequirements};
use crate::transport::http::handlers::common::{log_if_storage, page_message, status_for};
use crate::transport::http::types::{checkbox, AddSlotForm, AppState, ParkForm};
use crate::transport::http::views::{self, Notice};
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;

fn error_response(err: SlotError) -> Response {
    log_if_storage(&err);
    (status_for(&err), views::error_page(&page_message(&err))).into_response()
}

pub async fn index_handler(State(state): State<AppState>) -> Response {
    let slots = match state.parking.list_slots().await {
        Ok(s) => s,
        Err(e) => return error_response(e),
    };
    let counts = match state.parking.counts().await {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };
    views::index_page(&slots, counts).into_response()
}

pub async fn add_slot_form_handler() -> impl IntoResponse {
    views::add_slot_page(None)
}

pub async fn add_slot_handler(
    State(state): State<AppState>,
    Form(form): Form<AddSlotForm>,
) -> Response {
    let result = match parse_slot_number(&form.slot_no) {
        Ok(slot_no) => {
            state
                .parking
                .add_slot(NewSlot {
                    slot_no,
                    is_covered: checkbox(&form.is_covered),
                    is_ev_charging: checkbox(&form.is_ev_charging),
                })
                .await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => views::add_slot_page(Some(&Notice::Success(
            "Slot added successfully.".to_string(),
        )))
        .into_response(),
        Err(e) => {
            log_if_storage(&e);
            (
                status_for(&e),
                views::add_slot_page(Some(&Notice::Error(page_message(&e)))),
            )
                .into_response()
        }
    }
}

pub async fn park_form_handler() -> impl IntoResponse {
    views::park_page(None)
}

pub async fn park_handler(State(state): State<AppState>, Form(form): Form<ParkForm>) -> Response {
    let requirements = SlotRequirements::new(checkbox(&form.needs_ev), checkbox(&form.needs_cover));

    let notice = match state.parking.park(requirements).await {
        Ok(Allocation::Assigned(slot)) => {
            Notice::Success(format!("Vehicle parked at Slot {}", slot.slot_no))
        }
        Ok(Allocation::Unavailable) => Notice::Error("No slot available".to_string()),
        Err(e) => {
            log_if_storage(&e);
            return (
                status_for(&e),
                views::park_page(Some(&Notice::Error(page_message(&e)))),
            )
                .into_response();
        }
    };
    (StatusCode::OK, views::park_page(Some(&notice))).into_response()
}

/// Frees the slot and goes back to the list, whether or not the slot existed.
///
/// Only non-negative integers are routable; anything else is a 404 page.
pub async fn remove_vehicle_handler(
    State(state): State<AppState>,
    slot_no: Result<Path<i64>, PathRejection>,
) -> Response {
    let slot_no = match slot_no {
        Ok(Path(n)) if n >= 0 => n,
        _ => {
            return (StatusCode::NOT_FOUND, views::error_page("Page not found.")).into_response()
        }
    };

    match state.parking.release(slot_no).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) => error_response(e),
    }
}
