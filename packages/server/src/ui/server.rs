//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::{
    handler::{create_room, get_rooms, health_check, join_room, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat server
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(AppState::new(store, HISTORY_REPLAY_LIMIT));
/// Server::new(state).run("127.0.0.1:8080").await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws/{room_name}/{client_id}", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/create-room", post(create_room))
            .route("/api/join-room", post(join_room))
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .layer(TraceLayer::new_for_http())
            .with_state(Arc::clone(&self.state))
    }

    /// Bind to `bind_addr` (`host:port`) and serve until Ctrl+C / SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(
        self,
        bind_addr: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let listener = TcpListener::bind(bind_addr).await?;
        tracing::info!("Connect to: ws://{}/ws/{{room_name}}/{{client_id}}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");
        self.run_with_listener(listener).await
    }

    /// Serve on an already bound listener until Ctrl+C / SIGTERM.
    pub async fn run_with_listener(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app = self.router();

        tracing::info!(
            "Roomcast chat server listening on {}",
            listener.local_addr()?
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
