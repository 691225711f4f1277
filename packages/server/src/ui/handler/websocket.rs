//! WebSocket connection handlers.
//!
//! Each connection runs two tasks: a reader that turns inbound frames into
//! broadcasts, and a writer (`pusher_loop`) that drains the session's outbound
//! queue into the socket. When either ends, the other is aborted and the
//! session is detached from its room.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ClientId, RoomName},
    ui::state::AppState,
    usecase::DisconnectError,
};

/// `GET /ws/{room_name}/{client_id}`
///
/// The room password is not checked here; clients are expected to have
/// called `/api/join-room` first.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path((room_name, client_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, StatusCode> {
    let room = match RoomName::try_from(room_name.clone()) {
        Ok(room) => room,
        Err(e) => {
            tracing::warn!("Invalid room name '{}': {}", room_name, e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };
    let client_id = match ClientId::try_from(client_id.clone()) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Invalid client_id '{}': {}", client_id, e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, room, client_id)))
}

/// Spawns a task that drains the session's outbound queue into the WebSocket.
///
/// Ends when a write fails, which closes the queue for every later push.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(msg.into())).await {
                tracing::debug!("WebSocket write failed: {}", e);
                break;
            }
        }
    })
}

/// Spawns the session's receive loop.
///
/// Broadcasts are awaited one frame at a time, which keeps this sender's
/// messages in order for every recipient.
fn receiver_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    room: RoomName,
    client_id: ClientId,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error from '{}': {}", client_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}' in '{}'", client_id, room);
                    // persistence runs detached; failures are logged by the use case
                    let _sent = state
                        .send_message_usecase
                        .execute(&room, &client_id, text.as_str())
                        .await;
                }
                Message::Binary(data) => {
                    tracing::debug!(
                        "Ignoring {} byte binary frame from '{}'",
                        data.len(),
                        client_id
                    );
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", client_id);
                    break;
                }
                // ping/pong is answered by the WebSocket implementation
                Message::Ping(_) | Message::Pong(_) => {}
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    room: RoomName,
    client_id: ClientId,
) {
    let (sender, receiver) = socket.split();

    // Create the outbound queue for this session
    let (tx, rx) = mpsc::unbounded_channel();

    // Attach, replay history and announce arrival; all of it is queued on `tx`
    let session_id = state
        .connect_session_usecase
        .execute(&room, client_id.clone(), tx)
        .await;

    let mut send_task = pusher_loop(rx, sender);
    let mut recv_task = receiver_loop(receiver, Arc::clone(&state), room.clone(), client_id.clone());

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match state
        .disconnect_session_usecase
        .execute(&room, session_id, &client_id)
        .await
    {
        Ok(report) => {
            tracing::info!(
                "Client '{}' left room '{}' (notified {} sessions)",
                client_id,
                room,
                report.delivered
            );
        }
        Err(DisconnectError::NotAttached(_)) => {
            tracing::warn!(
                "Client '{}' ({}) was already detached from room '{}'",
                client_id,
                session_id,
                room
            );
        }
    }
}
