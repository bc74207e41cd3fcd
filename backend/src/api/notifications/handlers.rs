//! Handler for the real-time notification channel.
//!
//! Resolves the session identity before upgrading; unauthenticated
//! connections are rejected without an upgrade. Each accepted socket is
//! registered with the hub under its user id and drains pushed messages as
//! JSON text frames until either side closes.

use crate::errors::AppError;
use crate::state::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use notify::UserId;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
pub struct WsParams {
    token: Option<String>,
}

pub async fn notifications_ws(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(params): Query<WsParams>,
) -> Result<Response, AppError> {
    let token = params.token.ok_or(AppError::Unauthenticated)?;
    let session = state.auth.resolve(&token).await?;
    let user = UserId(session.user_id);

    Ok(ws.on_upgrade(move |socket| client_connection(socket, state, user)))
}

/// Pumps hub messages to the socket and watches for the peer going away.
/// On exit the connection is dropped from the hub; missed pushes are not
/// replayed, the next poll cycle covers them.
async fn client_connection(socket: WebSocket, state: Arc<AppState>, user: UserId) {
    let (connection, mut pushes) = state.hub.register(user).await;
    let (mut sink, mut stream) = socket.split();
    debug!(user = %user, "notification socket open");

    loop {
        tokio::select! {
            push = pushes.recv() => {
                let Some(message) = push else { break };
                let frame = match serde_json::to_string(&message) {
                    Ok(text) => Message::Text(text.into()),
                    Err(e) => {
                        warn!(user = %user, error = %e, "dropping unserializable push");
                        continue;
                    }
                };
                if sink.send(frame).await.is_err() {
                    break;
                }
            }
            incoming = stream.next() => {
                match incoming {
                    // Pings are answered by the protocol layer; other client
                    // frames carry nothing we act on.
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.hub.disconnect(user, connection).await;
    debug!(user = %user, "notification socket closed");
}
