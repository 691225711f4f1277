//! Shared test utilities for roomcast-server integration tests.
//!
//! Note: Some helpers may appear unused because each test file is compiled
//! as its own crate.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use roomcast_server::{
    domain::{ChatStore, RoomName},
    infrastructure::store::InMemoryChatStore,
    ui::{AppState, Server},
};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// A server running on an ephemeral port, plus handles into its state.
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: Arc<AppState>,
    pub store: Arc<InMemoryChatStore>,
}

impl TestServer {
    /// Start a server backed by an in-memory store on 127.0.0.1:0
    pub async fn start() -> Self {
        let store = Arc::new(InMemoryChatStore::new());
        let state = Arc::new(AppState::new(store.clone(), 20));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = Server::new(Arc::clone(&state));
        tokio::spawn(async move {
            let _ = server.run_with_listener(listener).await;
        });

        // Brief delay to ensure server is accepting connections
        tokio::time::sleep(Duration::from_millis(10)).await;

        Self { addr, state, store }
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST `{room_name, password}` to a control endpoint
    pub async fn post_credentials(
        &self,
        path: &str,
        room_name: &str,
        password: &str,
    ) -> reqwest::Response {
        reqwest::Client::new()
            .post(self.http_url(path))
            .json(&serde_json::json!({"room_name": room_name, "password": password}))
            .send()
            .await
            .expect("Failed to send request")
    }

    /// Wait until the store holds `count` messages for `room`
    pub async fn wait_for_history(&self, room: &str, count: usize) {
        let room = RoomName::new(room.to_string()).unwrap();
        let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
        loop {
            let stored = self.store.recent_messages(&room, usize::MAX).await.unwrap();
            if stored.len() >= count {
                return;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "Timed out waiting for {} stored messages (have {})",
                count,
                stored.len()
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Wait until `room` has exactly `count` live members
    pub async fn wait_for_members(&self, room: &str, count: usize) {
        let room = RoomName::new(room.to_string()).unwrap();
        let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
        loop {
            let members = self.state.registry.member_count(&room).await;
            if members == count {
                return;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "Timed out waiting for {} members (have {})",
                count,
                members
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

/// WebSocket chat client for protocol testing
pub struct ChatClient {
    sink: SplitSink<WsStream, Message>,
    stream: SplitStream<WsStream>,
}

impl ChatClient {
    /// Attach to `/ws/{room}/{client_id}`
    pub async fn connect(addr: SocketAddr, room: &str, client_id: &str) -> Self {
        let url = format!("ws://{}/ws/{}/{}", addr, room, client_id);
        let (ws, _) = tokio_tungstenite::connect_async(&url)
            .await
            .expect("Failed to connect");
        let (sink, stream) = ws.split();
        Self { sink, stream }
    }

    /// Send a text frame
    pub async fn send(&mut self, text: &str) {
        self.sink
            .send(Message::Text(text.to_string().into()))
            .await
            .unwrap();
    }

    /// Receive the next text frame, panicking after a timeout
    pub async fn recv(&mut self) -> String {
        tokio::time::timeout(RECV_TIMEOUT, self.recv_text())
            .await
            .expect("Timed out waiting for a message")
    }

    /// Receive with a short timeout, returns None if nothing arrives
    pub async fn try_recv(&mut self, duration: Duration) -> Option<String> {
        tokio::time::timeout(duration, self.recv_text()).await.ok()
    }

    /// Receive until a frame equal to `expected` arrives, returning the frames skipped
    pub async fn recv_until(&mut self, expected: &str) -> Vec<String> {
        let mut skipped = Vec::new();
        loop {
            let text = self.recv().await;
            if text == expected {
                return skipped;
            }
            skipped.push(text);
        }
    }

    /// Close the connection with a close frame
    pub async fn close(mut self) {
        let _ = self.sink.send(Message::Close(None)).await;
        let _ = self.sink.close().await;
    }

    async fn recv_text(&mut self) -> String {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return text.to_string(),
                Some(Ok(_)) => continue,
                Some(Err(e)) => panic!("WebSocket error: {}", e),
                None => panic!("WebSocket closed"),
            }
        }
    }
}
