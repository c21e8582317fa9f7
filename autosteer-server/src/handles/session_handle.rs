use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::app::AppState;

pub async fn get_sessions(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.registry.list().await)
}
