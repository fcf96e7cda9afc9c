use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::dtos::{
    requests::{CreateEventRequest, UpdateEventRequest},
    responses::EventEnvelope,
};
use crate::domain::models::event::{Event, FieldChanges, NewEventParams};
use crate::domain::services::{normalize, validation};
use crate::error::AppError;
use crate::state::AppState;

/// Write pipeline: validate -> normalize (slug/date/time for changed fields)
/// -> persist. Normalization failures abort before anything is written.
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = Event::new(NewEventParams {
        title: payload.title,
        description: payload.description,
        overview: payload.overview,
        image: payload.image,
        venue: payload.venue,
        location: payload.location,
        date: payload.date,
        time: payload.time,
        mode: payload.mode,
        audience: payload.audience,
        agenda: payload.agenda,
        organizer: payload.organizer,
        tags: payload.tags,
    });

    validation::validate_event(&event)?;
    normalize::apply(&mut event, &FieldChanges::creation())?;

    let created = state.event_repo.create(&event).await?;
    info!("Event created: {} ({})", created.slug, created.id);
    Ok(Json(created))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let slug = canonical_slug_param(&slug)?;

    let event = state.event_repo.find_by_slug(&slug).await?
        .ok_or_else(|| AppError::NotFound(format!("Event '{}' not found", slug)))?;

    Ok(Json(EventEnvelope {
        message: "Event fetched successfully".to_string(),
        event,
    }))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let slug = canonical_slug_param(&slug)?;

    let mut event = state.event_repo.find_by_slug(&slug).await?
        .ok_or_else(|| AppError::NotFound(format!("Event '{}' not found", slug)))?;
    let prev = event.clone();

    if let Some(val) = payload.title { event.title = val; }
    if let Some(val) = payload.description { event.description = val; }
    if let Some(val) = payload.overview { event.overview = val; }
    if let Some(val) = payload.image { event.image = val; }
    if let Some(val) = payload.venue { event.venue = val; }
    if let Some(val) = payload.location { event.location = val; }
    if let Some(val) = payload.date { event.date = val; }
    if let Some(val) = payload.time { event.time = val; }
    if let Some(val) = payload.mode { event.mode = val; }
    if let Some(val) = payload.audience { event.audience = val; }
    if let Some(val) = payload.agenda { event.agenda.0 = val; }
    if let Some(val) = payload.organizer { event.organizer = val; }
    if let Some(val) = payload.tags { event.tags.0 = val; }

    validation::validate_event(&event)?;

    let changes = FieldChanges::between(&prev, &event);
    normalize::apply(&mut event, &changes)?;
    event.updated_at = Utc::now();

    let updated = state.event_repo.update(&event).await?;
    info!("Event updated: {}", updated.slug);
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let slug = canonical_slug_param(&slug)?;

    let event = state.event_repo.find_by_slug(&slug).await?
        .ok_or_else(|| AppError::NotFound(format!("Event '{}' not found", slug)))?;

    // No cascade: bookings referencing this event are left in place.
    state.event_repo.delete(&event.id).await?;
    info!("Event deleted: {}", slug);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

/// Best-effort companion lookup for a non-critical UI feature: any failure,
/// including an unknown slug or a storage error, degrades to an empty list.
pub async fn get_similar_events(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let slug = canonical_slug_param(&slug)?;

    let events = match find_similar(&state, &slug).await {
        Ok(events) => events,
        Err(err) => {
            warn!("Similar-events lookup failed for '{}': {}", slug, err);
            Vec::new()
        }
    };

    Ok(Json(events))
}

async fn find_similar(state: &AppState, slug: &str) -> Result<Vec<Event>, AppError> {
    let Some(event) = state.event_repo.find_by_slug(slug).await? else {
        return Ok(Vec::new());
    };

    state.event_repo.find_related_by_tags(&event.tags, &event.id).await
}

/// Boundary treatment of the slug path segment: trim and lowercase before the
/// lookup, reject blank input before touching storage.
fn canonical_slug_param(raw: &str) -> Result<String, AppError> {
    let slug = raw.trim().to_lowercase();
    if slug.is_empty() {
        return Err(AppError::Validation("Event slug is required".into()));
    }
    Ok(slug)
}
