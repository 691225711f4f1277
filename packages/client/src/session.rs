//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use roomcast_shared::time::now_millis;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{api::ControlApi, error::ClientError};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// Attach to `room_name` as `client_id` and relay lines until the session ends.
///
/// Returns `Ok(())` when the user closes the input, and
/// `Err(ClientError::ConnectionError)` when the connection is lost.
pub async fn run_client_session(
    api: &ControlApi,
    room_name: &str,
    client_id: &str,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let url = api.websocket_url(room_name, client_id)?;
    let (ws_stream, _response) = connect_async(&url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to {}", url);
    print!("{}", MessageFormatter::format_attached(room_name, client_id));
    redisplay_prompt();

    let (mut write, mut read) = ws_stream.split();

    let client_id_for_read = client_id.to_string();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted =
                        MessageFormatter::format_line(&text, &client_id_for_read, now_millis());
                    print!("{}", formatted);
                    redisplay_prompt();
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt();
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    loop {
        tokio::select! {
            _ = &mut read_task => {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
            line = input.recv() => {
                let Some(line) = line else {
                    read_task.abort();
                    let _ = write.send(Message::Close(None)).await;
                    return Ok(());
                };

                if let Err(e) = write.send(Message::Text(line.into())).await {
                    tracing::warn!("Failed to send message: {}", e);
                    read_task.abort();
                    return Err(ClientError::ConnectionError(e.to_string()));
                }
            }
        }
    }
}
