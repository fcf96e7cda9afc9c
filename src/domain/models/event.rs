use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub overview: String,
    pub image: String,
    pub venue: String,
    pub location: String,
    /// Canonical `YYYY-MM-DD` once persisted; raw input before normalization.
    pub date: String,
    /// Canonical 24-hour `HH:MM` once persisted.
    pub time: String,
    pub mode: String,
    pub audience: String,
    pub agenda: Json<Vec<String>>,
    pub organizer: String,
    pub tags: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewEventParams {
    pub title: String,
    pub description: String,
    pub overview: String,
    pub image: String,
    pub venue: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub mode: String,
    pub audience: String,
    pub agenda: Vec<String>,
    pub organizer: String,
    pub tags: Vec<String>,
}

impl Event {
    /// Slug is left empty here; the normalization stage derives it from the title.
    pub fn new(params: NewEventParams) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            slug: String::new(),
            description: params.description,
            overview: params.overview,
            image: params.image,
            venue: params.venue,
            location: params.location,
            date: params.date,
            time: params.time,
            mode: params.mode,
            audience: params.audience,
            agenda: Json(params.agenda),
            organizer: params.organizer,
            tags: Json(params.tags),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Explicit diff of the fields that feed the normalizers. Creation marks
/// everything changed; updates compare against the previously stored values.
#[derive(Debug, Clone, Copy)]
pub struct FieldChanges {
    pub title: bool,
    pub date: bool,
    pub time: bool,
}

impl FieldChanges {
    pub fn creation() -> Self {
        Self { title: true, date: true, time: true }
    }

    pub fn between(prev: &Event, next: &Event) -> Self {
        Self {
            title: prev.title != next.title,
            date: prev.date != next.date,
            time: prev.time != next.time,
        }
    }
}
