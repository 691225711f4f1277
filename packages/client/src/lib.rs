//! CLI client for the Roomcast chat relay.

pub mod api;
pub mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::{ClientOptions, run_client};
