//! Client execution logic with reconnection support.

use std::time::Duration;

use crate::{
    api::ControlApi,
    domain::{generate_client_id, should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
};

use super::{session::run_client_session, ui::spawn_input_reader};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// What the user asked for on the command line
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Server origin, e.g. `http://127.0.0.1:8080`
    pub server: String,
    pub room_name: String,
    pub password: String,
    /// Create the room before joining it
    pub create: bool,
    /// Fixed client id; a fresh one is generated per session when absent
    pub client_id: Option<String>,
}

/// Run the chat client with reconnection logic
pub async fn run_client(options: ClientOptions) -> Result<(), ClientError> {
    let api = ControlApi::new(options.server.clone());

    if options.create {
        api.create_room(&options.room_name, &options.password).await?;
        tracing::info!("Room '{}' created", options.room_name);
    }

    let mut input = spawn_input_reader();
    let mut reconnect_count = 0;

    loop {
        let client_id = options.client_id.clone().unwrap_or_else(generate_client_id);
        tracing::info!(
            "Joining room '{}' at {} as 'Client #{}' (attempt {}/{})",
            options.room_name,
            options.server,
            client_id,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        let result = match api.join_room(&options.room_name, &options.password).await {
            Ok(()) => run_client_session(&api, &options.room_name, &client_id, &mut input).await,
            Err(e) => Err(e),
        };

        let e = match result {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => e,
        };

        if should_exit_immediately(&e) {
            return Err(e);
        }

        tracing::warn!("Connection lost: {}", e);
        reconnect_count += 1;

        if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
            tracing::error!(
                "Failed to reconnect after {} attempts. Exiting.",
                MAX_RECONNECT_ATTEMPTS
            );
            return Err(e);
        }

        tracing::info!(
            "Reconnecting in {} seconds... (attempt {}/{})",
            RECONNECT_INTERVAL_SECS,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );
        tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
    }
}
