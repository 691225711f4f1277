//! Room-scoped WebSocket chat relay server.
//!
//! Clients create or join password-protected rooms over the control API, then
//! attach to `/ws/{room_name}/{client_id}`. Every message is broadcast to the
//! room and the last messages are replayed on join.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomcast-server
//! cargo run --bin roomcast-server -- --host 0.0.0.0 --port 3000 --database chat.db
//! ```

use std::sync::Arc;

use clap::Parser;
use roomcast_server::{
    config::ServerConfig,
    ui::{AppState, Server},
};
use roomcast_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), "debug");

    let config = ServerConfig::parse();

    // 1. Store (in-memory or SQLite)
    let store = match config.open_store() {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    // 2. Registry, broadcaster and use cases
    let state = Arc::new(AppState::new(store, config.history_limit));

    // 3. Server
    let server = Server::new(state);
    if let Err(e) = server.run(&config.bind_addr()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
