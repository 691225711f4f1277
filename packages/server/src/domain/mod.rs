//! ドメイン層
//!
//! 値オブジェクト、エンティティ、そしてドメインが必要とする外部インターフェース
//! （永続化ゲートウェイ）を定義します。

pub mod entity;
pub mod error;
pub mod session;
pub mod store;
pub mod value_object;

pub use entity::{RoomRecord, StoredMessage};
pub use error::{StoreError, ValueObjectError};
pub use session::{Outbox, SessionHandle, SessionId, SessionIdFactory};
pub use store::ChatStore;
#[cfg(test)]
pub use store::MockChatStore;
pub use value_object::{ClientId, Password, RoomName, Timestamp};

/// Number of persisted messages replayed to a session when it joins.
pub const HISTORY_REPLAY_LIMIT: usize = 20;
