use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::models::event::{Event, FieldChanges};
use crate::error::AppError;

static RE_NON_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static RE_HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());

/// `H:MM` or `HH:MM`, optional AM/PM suffix with optional space.
static RE_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d{1,2}):(\d{2})(?:\s?(AM|PM))?$").unwrap());

/// Derive a canonical URL-safe slug from a free-text title.
///
/// Lowercase, trimmed, everything outside `[a-z0-9\s-]` stripped, whitespace
/// runs and hyphen runs collapsed to single hyphens, no leading or trailing
/// hyphen. Idempotent on already-canonical input. Uniqueness is *not*
/// guaranteed here; the storage-level unique index rejects collisions.
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let stripped = RE_NON_SLUG.replace_all(&lowered, "");
    let hyphenated = RE_WHITESPACE.replace_all(stripped.trim(), "-");
    let collapsed = RE_HYPHEN_RUN.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%m/%d/%Y",
    "%Y/%m/%d",
];

/// Canonicalize an arbitrary date string to `YYYY-MM-DD`.
///
/// Timestamped inputs are truncated to the UTC date of the instant; any
/// timezone information beyond that is discarded.
pub fn normalize_date(input: &str) -> Result<String, AppError> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc).format("%Y-%m-%d").to_string());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.format("%Y-%m-%d").to_string());
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date.format("%Y-%m-%d").to_string());
        }
    }

    Err(AppError::InvalidFormat("Invalid date format".into()))
}

/// Canonicalize a clock time to zero-padded 24-hour `HH:MM`.
///
/// Accepts `H:MM`/`HH:MM` with an optional AM/PM suffix. PM adds 12 hours
/// unless the hour is already 12; AM zeroes hour 12. Anything that lands
/// outside 00:00-23:59 after conversion is rejected.
pub fn normalize_time(input: &str) -> Result<String, AppError> {
    let caps = RE_TIME
        .captures(input.trim())
        .ok_or_else(|| AppError::InvalidFormat("Invalid time format".into()))?;

    let mut hour: u32 = caps[1]
        .parse()
        .map_err(|_| AppError::InvalidFormat("Invalid time format".into()))?;
    let minute: u32 = caps[2]
        .parse()
        .map_err(|_| AppError::InvalidFormat("Invalid time format".into()))?;

    if let Some(meridiem) = caps.get(3) {
        match meridiem.as_str().to_ascii_uppercase().as_str() {
            "PM" if hour != 12 => hour += 12,
            "AM" if hour == 12 => hour = 0,
            _ => {}
        }
    }

    if hour > 23 || minute > 59 {
        return Err(AppError::InvalidFormat(
            "Time must be between 00:00 and 23:59".into(),
        ));
    }

    Ok(format!("{:02}:{:02}", hour, minute))
}

/// Normalization stage of the write pipeline. Each normalizer runs only for
/// the fields the change-set marks as new or changed; an unrelated update
/// leaves slug, date and time untouched.
pub fn apply(event: &mut Event, changes: &FieldChanges) -> Result<(), AppError> {
    if changes.title {
        event.slug = slugify(&event.title);
    }
    if changes.date {
        event.date = normalize_date(&event.date)?;
    }
    if changes.time {
        event.time = normalize_time(&event.time)?;
    }
    Ok(())
}
