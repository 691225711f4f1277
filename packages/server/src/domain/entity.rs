//! Entities recorded by the persistence gateway.

use super::value_object::{ClientId, Password, RoomName, Timestamp};

/// A room as recorded by the store.
///
/// The password is fixed at creation; there is no update operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    pub name: RoomName,
    pub password: Password,
    pub created_at: Timestamp,
}

impl RoomRecord {
    pub fn new(name: RoomName, password: Password, created_at: Timestamp) -> Self {
        Self {
            name,
            password,
            created_at,
        }
    }
}

/// A persisted chat message.
///
/// `sent_at` is assigned by the store when the message is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub room: RoomName,
    pub client_id: ClientId,
    pub body: String,
    pub sent_at: Timestamp,
}
