//! UseCase 層
//!
//! - `room_access`: ルーム作成・入室可否の判定（Room Access Controller）
//! - `connect_session`: セッションの登録、履歴の再送、入室通知
//! - `send_message`: メッセージのブロードキャストと永続化
//! - `disconnect_session`: セッションの登録解除と退室通知

mod connect_session;
mod disconnect_session;
mod error;
mod room_access;
mod send_message;

pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::{AccessError, CreateRoomError, DisconnectError};
pub use room_access::RoomAccessController;
pub use send_message::{SendMessageUseCase, SentMessage};
