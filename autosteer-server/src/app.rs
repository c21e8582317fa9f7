use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::configs::Settings;
use crate::handles::*;
use crate::services::SessionRegistry;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub registry: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(settings: &Arc<Settings>) -> Self {
        Self {
            settings: settings.clone(),
            registry: Arc::new(SessionRegistry::new()),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        // The simulator's socket.io client connects here.
        .route("/socket.io/", get(index))
        .route("/sessions", get(get_sessions))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
