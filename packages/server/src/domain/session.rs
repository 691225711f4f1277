//! Registry-side view of a connection session.
//!
//! The WebSocket itself is owned by the session's tasks (`ui::handler::websocket`).
//! Everything else only ever sees a [`SessionHandle`]: the session identity plus
//! the sending half of its outbound queue. Dropping the queue's receiver is how a
//! closed transport becomes visible to the broadcaster.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use tokio::sync::mpsc;

use super::value_object::ClientId;

/// Sending half of a session's outbound queue.
pub type Outbox = mpsc::UnboundedSender<String>;

/// Server-generated, process-unique identifier of one live session.
///
/// Unlike [`ClientId`] this never collides, so it is the membership key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Hands out increasing session ids.
#[derive(Debug, Default)]
pub struct SessionIdFactory {
    next: AtomicU64,
}

impl SessionIdFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(&self) -> SessionId {
        SessionId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

/// Non-owning membership reference to a live session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: SessionId,
    client_id: ClientId,
    outbox: Outbox,
}

impl SessionHandle {
    pub fn new(id: SessionId, client_id: ClientId, outbox: Outbox) -> Self {
        Self {
            id,
            client_id,
            outbox,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Enqueue `text` for delivery to this session.
    ///
    /// Fails only when the session's writer has gone away.
    pub fn push(&self, text: &str) -> Result<(), mpsc::error::SendError<String>> {
        self.outbox.send(text.to_string())
    }
}
