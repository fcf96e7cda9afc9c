use serde::Serialize;

use crate::domain::models::event::Event;

#[derive(Serialize)]
pub struct EventEnvelope {
    pub message: String,
    pub event: Event,
}
