//! Shared utilities for the Roomcast server and client.

pub mod logger;
pub mod time;
pub mod wire;
