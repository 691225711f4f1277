//! HTTP and WebSocket handlers.

pub mod http;
pub mod websocket;

pub use http::{create_room, get_rooms, health_check, join_room};
pub use websocket::websocket_handler;
