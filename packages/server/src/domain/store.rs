//! Persistence gateway trait 定義
//!
//! ルームの認証情報とメッセージ履歴を保存する外部ストアへのインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ClientId, Password, RoomName, StoreError, StoredMessage};

/// Durable store for room credentials and message history.
///
/// Implementations must not block the async runtime: blocking I/O belongs on
/// `tokio::task::spawn_blocking`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// `true` if a room named `name` has been recorded.
    async fn room_exists(&self, name: &RoomName) -> Result<bool, StoreError>;

    /// Record a new room.
    ///
    /// Fails with [`StoreError::RoomAlreadyExists`] if the name is taken, leaving
    /// the existing record untouched.
    async fn create_room_record(
        &self,
        name: &RoomName,
        password: &Password,
    ) -> Result<(), StoreError>;

    /// `true` if the room exists and its password equals `password` exactly.
    async fn check_password(
        &self,
        name: &RoomName,
        password: &Password,
    ) -> Result<bool, StoreError>;

    /// Append a message to the room's history. The store assigns the timestamp.
    async fn append_message(
        &self,
        room: &RoomName,
        client_id: &ClientId,
        body: &str,
    ) -> Result<(), StoreError>;

    /// The last `limit` messages of the room, oldest first.
    async fn recent_messages(
        &self,
        room: &RoomName,
        limit: usize,
    ) -> Result<Vec<StoredMessage>, StoreError>;
}
