use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::app::AppState;
use crate::services::{Session, handle_websocket};

pub const INDEX_BODY: &str = "<h1>Hello world!</h1>";

/// Upgrades simulator connections; plain requests get a static page.
pub async fn index(
    ws: Option<WebSocketUpgrade>,
    peer: Option<ConnectInfo<SocketAddr>>,
    State(state): State<AppState>,
) -> Response {
    let Some(ws) = ws else {
        return Html(INDEX_BODY).into_response();
    };

    let session = Session::new(
        peer.map(|ConnectInfo(addr)| addr),
        state.settings.controller,
        state.settings.steering.throttle,
    );
    let registry = state.registry.clone();

    ws.on_upgrade(move |socket| handle_websocket(socket, session, registry))
}

pub async fn fallback() -> impl IntoResponse {
    StatusCode::OK
}
