//! Room-scoped WebSocket chat relay.
//!
//! Clients join named, password-protected rooms, every message is broadcast
//! to all members of the same room, and recent history is replayed on join.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
