use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::models::booking::Booking;
use crate::domain::models::event::Event;
use crate::error::AppError;

pub const EVENT_MODES: &[&str] = &["online", "offline", "hybrid"];

static RE_EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

const TITLE_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 1000;
const OVERVIEW_MAX: usize = 500;

/// Field-level validation stage. Collects every violated rule and reports them
/// all in one error rather than stopping at the first.
pub fn validate_event(event: &Event) -> Result<(), AppError> {
    let mut violations: Vec<String> = Vec::new();

    if event.title.trim().is_empty() {
        violations.push("Title is required".into());
    } else if event.title.chars().count() > TITLE_MAX {
        violations.push(format!("Title must be at most {} characters", TITLE_MAX));
    }

    if event.description.trim().is_empty() {
        violations.push("Description is required".into());
    } else if event.description.chars().count() > DESCRIPTION_MAX {
        violations.push(format!("Description must be at most {} characters", DESCRIPTION_MAX));
    }

    if event.overview.trim().is_empty() {
        violations.push("Overview is required".into());
    } else if event.overview.chars().count() > OVERVIEW_MAX {
        violations.push(format!("Overview must be at most {} characters", OVERVIEW_MAX));
    }

    if event.image.trim().is_empty() {
        violations.push("Image is required".into());
    }
    if event.venue.trim().is_empty() {
        violations.push("Venue is required".into());
    }
    if event.location.trim().is_empty() {
        violations.push("Location is required".into());
    }
    if event.date.trim().is_empty() {
        violations.push("Date is required".into());
    }
    if event.time.trim().is_empty() {
        violations.push("Time is required".into());
    }
    if event.audience.trim().is_empty() {
        violations.push("Audience is required".into());
    }
    if event.organizer.trim().is_empty() {
        violations.push("Organizer is required".into());
    }

    if !EVENT_MODES.contains(&event.mode.as_str()) {
        violations.push(format!("Mode must be one of: {}", EVENT_MODES.join(", ")));
    }

    if event.agenda.is_empty() {
        violations.push("Agenda must contain at least one item".into());
    }
    if event.tags.is_empty() {
        violations.push("Tags must contain at least one tag".into());
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations.join("; ")))
    }
}

pub fn validate_booking(booking: &Booking) -> Result<(), AppError> {
    let mut violations: Vec<String> = Vec::new();

    if booking.event_id.trim().is_empty() {
        violations.push("Event id is required".into());
    }
    if !RE_EMAIL.is_match(&booking.email) {
        violations.push("Invalid email address".into());
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations.join("; ")))
    }
}
