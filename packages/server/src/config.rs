//! Server configuration.
//!
//! Every option can be given on the command line or through a `ROOMCAST_*`
//! environment variable.

use std::{path::PathBuf, sync::Arc};

use clap::Parser;

use crate::{
    domain::{ChatStore, HISTORY_REPLAY_LIMIT, StoreError},
    infrastructure::store::{InMemoryChatStore, SqliteChatStore},
};

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "roomcast-server")]
#[command(about = "Room-scoped WebSocket chat relay with password-protected rooms", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "ROOMCAST_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "ROOMCAST_PORT", default_value = "8080")]
    pub port: u16,

    /// SQLite database file for rooms and message history (in-memory if omitted)
    #[arg(short = 'd', long, env = "ROOMCAST_DATABASE")]
    pub database: Option<PathBuf>,

    /// Number of past messages replayed to a client when it joins a room
    #[arg(long, env = "ROOMCAST_HISTORY_LIMIT", default_value_t = HISTORY_REPLAY_LIMIT)]
    pub history_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database: None,
            history_limit: HISTORY_REPLAY_LIMIT,
        }
    }
}

impl ServerConfig {
    /// `host:port` to bind the listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Open the configured chat store.
    pub fn open_store(&self) -> Result<Arc<dyn ChatStore>, StoreError> {
        match &self.database {
            Some(path) => {
                tracing::info!("Using SQLite store at {}", path.display());
                Ok(Arc::new(SqliteChatStore::open(path)?))
            }
            None => {
                tracing::info!("Using in-memory store; history is lost on shutdown");
                Ok(Arc::new(InMemoryChatStore::new()))
            }
        }
    }
}
