use event_backend::{
    api::router::create_router,
    config::Config,
    infra::factory::bootstrap_state,
    state::AppState,
};
use axum::{
    body::Body,
    http::Request,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    /// Throwaway sqlite-backed app; the pool connects and migrates lazily on
    /// the first request.
    pub fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        Self::with_database_url(Some(db_url), db_filename)
    }

    /// App with a broken storage configuration, for connection-error paths.
    pub fn without_database() -> Self {
        Self::with_database_url(None, String::new())
    }

    fn with_database_url(database_url: Option<String>, db_filename: String) -> Self {
        let config = Config { database_url, port: 0 };
        let state = Arc::new(bootstrap_state(&config));
        let router = create_router(state.clone());

        Self { router, db_filename, state }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> axum::response::Response {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json");

        let request = match body {
            Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Minimal valid event payload; callers override what they care about.
#[allow(dead_code)]
pub fn event_payload(title: &str, tags: Vec<&str>) -> Value {
    json!({
        "title": title,
        "description": "A gathering of developers",
        "overview": "Talks, snacks and networking",
        "image": "https://example.com/banner.png",
        "venue": "Community Hall",
        "location": "Berlin",
        "date": "2024-03-05",
        "time": "18:00",
        "mode": "offline",
        "audience": "Developers",
        "agenda": ["Doors open", "Talks", "Networking"],
        "organizer": "Rust Berlin",
        "tags": tags
    })
}
