//! `ChatStore` の実装
//!
//! - `inmemory`: プロセス内の HashMap をストアとして使う実装（デフォルト、テスト用）
//! - `sqlite`: SQLite ファイルに永続化する実装

pub mod inmemory;
pub mod sqlite;

pub use inmemory::InMemoryChatStore;
pub use sqlite::SqliteChatStore;
