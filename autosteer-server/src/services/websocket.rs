use std::sync::Arc;

use axum::extract::ws::{Message as WsMessage, WebSocket};
use futures::{SinkExt, StreamExt};

use super::{Session, SessionRegistry};

/// Drives one simulator connection until it closes. The session is owned by
/// this task for the whole connection.
pub async fn handle_websocket(socket: WebSocket, mut session: Session, registry: Arc<SessionRegistry>) {
    let (mut sender, mut receiver) = socket.split();
    let session_id = session.id();

    registry.publish(session.snapshot()).await;
    let active = registry.len().await;

    tracing::info!(
        session = %session_id,
        peer = ?session.peer(),
        active,
        "Connected"
    );

    while let Some(result) = receiver.next().await {
        match result {
            Ok(WsMessage::Text(text)) => {
                let Some(reply) = session.handle_frame(&text) else {
                    continue;
                };

                if let Err(e) = sender.send(WsMessage::Text(reply.encode())).await {
                    tracing::warn!("Failed to reply to session {}: {}", session_id, e);
                    break;
                }

                registry.publish(session.snapshot()).await;
            }
            Ok(WsMessage::Close(_)) => {
                tracing::debug!("Session {} closed by peer", session_id);
                break;
            }
            Err(e) => {
                tracing::warn!("WebSocket error for session {}: {}", session_id, e);
                break;
            }
            _ => {}
        }
    }

    registry.remove(&session_id).await;

    tracing::info!(
        session = %session_id,
        steps = session.snapshot().steps,
        "Disconnected"
    );
}
