use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::{BookingRepository, EventRepository};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_repo: Arc<dyn EventRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
}
