//! WebSocket chat server implementation.

mod dto;
mod handler;
mod server;
mod signal;
pub mod state;

pub use dto::{ErrorResponse, MessageResponse, RoomCredentialsRequest, RoomSummaryDto};
pub use server::Server;
pub use state::AppState;
