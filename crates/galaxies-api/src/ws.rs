//! `WebSocket` handler for per-player state pushes.
//!
//! Clients connect to `GET /ws/players/{id}`. On connect they receive the
//! player's current state, then every update the engine publishes for that
//! player, each as
//!
//! ```json
//! {"type": "PLAYER_UPDATE", "data": { "player": ..., "ship": ... }}
//! ```
//!
//! Updates for other players on the shared broadcast channel are skipped.
//! A client that falls behind skips the lagged messages and resumes from
//! the newest.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use galaxies_core::PersistenceGateway;
use galaxies_types::{PlayerId, PlayerSnapshot};
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::handlers::parse_uuid;
use crate::state::AppState;

/// Message type tag for player pushes.
pub const PLAYER_UPDATE: &str = "PLAYER_UPDATE";

/// Encode a push frame.
pub fn player_update_frame(snapshot: &PlayerSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string(&serde_json::json!({
        "type": PLAYER_UPDATE,
        "data": snapshot,
    }))
}

/// Upgrade an HTTP request to a `WebSocket` bound to one player.
///
/// The player must be resolvable (online or stored) before the upgrade.
///
/// # Route
///
/// `GET /ws/players/{id}`
pub async fn ws_player<G: PersistenceGateway>(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState<G>>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let player_id = PlayerId(parse_uuid(&id_str)?);
    let (initial, rx) = open_stream(&state, player_id).await?;
    Ok(ws.on_upgrade(move |socket| handle_ws(socket, rx, initial)))
}

/// Subscribe to pushes, then read the player. Anything published after the
/// read is already queued on the receiver.
async fn open_stream<G: PersistenceGateway>(
    state: &AppState<G>,
    player_id: PlayerId,
) -> Result<(PlayerSnapshot, Receiver<PlayerSnapshot>), ApiError> {
    let rx = state.engine.sink().subscribe();
    let initial = state.engine.player_view(player_id).await?;
    Ok((initial, rx))
}

async fn send_snapshot(socket: &mut WebSocket, snapshot: &PlayerSnapshot) -> bool {
    let json = match player_update_frame(snapshot) {
        Ok(j) => j,
        Err(e) => {
            warn!("Failed to serialize player update: {e}");
            return true;
        }
    };
    socket.send(Message::Text(json.into())).await.is_ok()
}

async fn handle_ws(
    mut socket: WebSocket,
    mut rx: Receiver<PlayerSnapshot>,
    initial: PlayerSnapshot,
) {
    let player_id = initial.player.id;
    debug!(%player_id, "WebSocket client connected");

    if !send_snapshot(&mut socket, &initial).await {
        return;
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(snapshot) if snapshot.player.id == player_id => {
                        if !send_snapshot(&mut socket, &snapshot).await {
                            debug!(%player_id, "WebSocket client disconnected (send failed)");
                            return;
                        }
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(n)) => {
                        debug!(%player_id, skipped = n, "WebSocket client lagged, skipping ahead");
                    }
                    Err(RecvError::Closed) => {
                        debug!("Broadcast channel closed, shutting down WebSocket");
                        return;
                    }
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(%player_id, "WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(%player_id, "WebSocket error: {e}");
                        return;
                    }
                    _ => {}
                }
            }
        }
    }
}
