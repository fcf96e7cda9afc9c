use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::dtos::requests::{CreateBookingRequest, UpdateBookingRequest};
use crate::domain::models::booking::Booking;
use crate::domain::services::validation;
use crate::error::AppError;
use crate::state::AppState;

/// Write pipeline: validate -> check-reference -> persist. The existence
/// check and the insert are separate round-trips; a concurrent deletion of
/// the referenced event in between is an accepted race.
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = Booking::new(payload.event_id, payload.email);

    validation::validate_booking(&booking)?;
    ensure_event_exists(&state, &booking.event_id).await?;

    let created = state.booking_repo.create(&booking).await?;
    info!("Booking created: {} for event {}", created.id, created.event_id);
    Ok(Json(created))
}

pub async fn list_bookings_for_event(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let slug = slug.trim().to_lowercase();

    let event = state.event_repo.find_by_slug(&slug).await?
        .ok_or_else(|| AppError::NotFound(format!("Event '{}' not found", slug)))?;

    let bookings = state.booking_repo.list_by_event(&event.id).await?;
    Ok(Json(bookings))
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Json(payload): Json<UpdateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

    let reference_changed = payload
        .event_id
        .as_ref()
        .is_some_and(|id| *id != booking.event_id);

    if let Some(event_id) = payload.event_id {
        booking.event_id = event_id;
    }
    if let Some(email) = payload.email {
        booking.email = email.trim().to_lowercase();
    }

    validation::validate_booking(&booking)?;
    if reference_changed {
        ensure_event_exists(&state, &booking.event_id).await?;
    }

    booking.updated_at = Utc::now();

    let updated = state.booking_repo.update(&booking).await?;
    info!("Booking updated: {}", updated.id);
    Ok(Json(updated))
}

/// Referential-integrity stage. A missing event and a failed lookup both
/// surface as validation errors, with distinct messages so callers can tell
/// "no such event" apart from "could not verify".
async fn ensure_event_exists(state: &AppState, event_id: &str) -> Result<(), AppError> {
    match state.event_repo.find_by_id(event_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(AppError::Validation(format!(
            "Event not found with id: {}",
            event_id
        ))),
        Err(err) => {
            warn!("Could not verify event '{}': {}", event_id, err);
            Err(AppError::Validation(format!(
                "Invalid event id or storage failure verifying: {}",
                event_id
            )))
        }
    }
}
