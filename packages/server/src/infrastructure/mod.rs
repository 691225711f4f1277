//! Infrastructure 層
//!
//! - `store`: 永続化ゲートウェイ（`ChatStore`）の実装
//! - `registry`: ルームごとの接続セッション管理
//! - `broadcaster`: ルーム内の全セッションへのファンアウト

pub mod broadcaster;
pub mod registry;
pub mod store;

pub use broadcaster::{BroadcastReport, Broadcaster};
pub use registry::RoomRegistry;
