//! SQLite ChatStore 実装
//!
//! `rusqlite` の同期 API を `spawn_blocking` 上で実行し、非同期ランタイムを
//! ブロックしないようにします。テーブルは open 時に作成されます。

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use roomcast_shared::time::now_millis;
use rusqlite::{Connection, ErrorCode, params};

use crate::domain::{ChatStore, ClientId, Password, RoomName, StoreError, StoredMessage, Timestamp};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS rooms (
    room_name  TEXT PRIMARY KEY,
    password   TEXT NOT NULL,
    created_at INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS chat_messages (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    room_name TEXT NOT NULL,
    client_id TEXT NOT NULL,
    message   TEXT NOT NULL,
    timestamp INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_chat_messages_room ON chat_messages (room_name, id);
";

fn unavailable(e: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

/// SQLite ChatStore 実装
#[derive(Clone)]
pub struct SqliteChatStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteChatStore {
    /// データベースファイルを開き（なければ作成し）、スキーマを用意する
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(unavailable)?;
        Self::init(conn)
    }

    /// インメモリの SQLite データベースを開く
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(unavailable)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA).map_err(unavailable)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking thread pool.
    async fn run<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| unavailable("sqlite connection lock poisoned"))?;
            f(&conn)
        })
        .await
        .map_err(unavailable)?
    }
}

#[async_trait]
impl ChatStore for SqliteChatStore {
    async fn room_exists(&self, name: &RoomName) -> Result<bool, StoreError> {
        let name = name.as_str().to_string();
        self.run(move |conn| {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM rooms WHERE room_name = ?1",
                    params![name],
                    |row| row.get(0),
                )
                .map_err(unavailable)?;
            Ok(count > 0)
        })
        .await
    }

    async fn create_room_record(
        &self,
        name: &RoomName,
        password: &Password,
    ) -> Result<(), StoreError> {
        let name = name.as_str().to_string();
        let password = password.as_str().to_string();
        let created_at = now_millis();
        self.run(move |conn| {
            match conn.execute(
                "INSERT INTO rooms (room_name, password, created_at) VALUES (?1, ?2, ?3)",
                params![name, password, created_at],
            ) {
                Ok(_) => Ok(()),
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == ErrorCode::ConstraintViolation =>
                {
                    Err(StoreError::RoomAlreadyExists(name))
                }
                Err(e) => Err(unavailable(e)),
            }
        })
        .await
    }

    async fn check_password(
        &self,
        name: &RoomName,
        password: &Password,
    ) -> Result<bool, StoreError> {
        let name = name.as_str().to_string();
        let password = password.as_str().to_string();
        self.run(move |conn| {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM rooms WHERE room_name = ?1 AND password = ?2",
                    params![name, password],
                    |row| row.get(0),
                )
                .map_err(unavailable)?;
            Ok(count > 0)
        })
        .await
    }

    async fn append_message(
        &self,
        room: &RoomName,
        client_id: &ClientId,
        body: &str,
    ) -> Result<(), StoreError> {
        let room = room.as_str().to_string();
        let client_id = client_id.as_str().to_string();
        let body = body.to_string();
        let timestamp = now_millis();
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO chat_messages (room_name, client_id, message, timestamp) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![room, client_id, body, timestamp],
            )
            .map_err(unavailable)?;
            Ok(())
        })
        .await
    }

    async fn recent_messages(
        &self,
        room: &RoomName,
        limit: usize,
    ) -> Result<Vec<StoredMessage>, StoreError> {
        let room_key = room.as_str().to_string();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<(String, String, i64)> = self
            .run(move |conn| {
                let mut stmt = conn
                    .prepare(
                        "SELECT client_id, message, timestamp FROM chat_messages \
                         WHERE room_name = ?1 ORDER BY id DESC LIMIT ?2",
                    )
                    .map_err(unavailable)?;
                let rows = stmt
                    .query_map(params![room_key, limit], |row| {
                        Ok((row.get(0)?, row.get(1)?, row.get(2)?))
                    })
                    .map_err(unavailable)?
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(unavailable)?;
                Ok(rows)
            })
            .await?;

        // newest first from the query; callers want oldest first
        let messages = rows
            .into_iter()
            .rev()
            .filter_map(|(client_id, body, timestamp)| match ClientId::new(client_id) {
                Ok(client_id) => Some(StoredMessage {
                    room: room.clone(),
                    client_id,
                    body,
                    sent_at: Timestamp::new(timestamp),
                }),
                Err(e) => {
                    tracing::warn!("Skipping stored message with invalid client_id: {}", e);
                    None
                }
            })
            .collect();

        Ok(messages)
    }
}
