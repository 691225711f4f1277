//! InMemory ChatStore 実装
//!
//! HashMap をインメモリ DB として使用します。プロセス終了とともに履歴は失われます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use roomcast_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::domain::{
    ChatStore, ClientId, Password, RoomName, RoomRecord, StoreError, StoredMessage, Timestamp,
};

#[derive(Default)]
struct StoreState {
    rooms: HashMap<RoomName, RoomRecord>,
    messages: HashMap<RoomName, Vec<StoredMessage>>,
}

/// インメモリ ChatStore 実装
pub struct InMemoryChatStore {
    /// 作成時刻・送信時刻の採番に使う時計
    clock: Arc<dyn Clock>,
    state: Mutex<StoreState>,
}

impl InMemoryChatStore {
    /// システム時計を使う InMemoryChatStore を作成
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// 任意の時計を使う InMemoryChatStore を作成
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// 記録されているルームを取得
    pub async fn room(&self, name: &RoomName) -> Option<RoomRecord> {
        let state = self.state.lock().await;
        state.rooms.get(name).cloned()
    }
}

impl Default for InMemoryChatStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn room_exists(&self, name: &RoomName) -> Result<bool, StoreError> {
        let state = self.state.lock().await;
        Ok(state.rooms.contains_key(name))
    }

    async fn create_room_record(
        &self,
        name: &RoomName,
        password: &Password,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        if state.rooms.contains_key(name) {
            return Err(StoreError::RoomAlreadyExists(name.as_str().to_string()));
        }
        let record = RoomRecord::new(
            name.clone(),
            password.clone(),
            Timestamp::new(self.clock.now_millis()),
        );
        state.rooms.insert(name.clone(), record);
        Ok(())
    }

    async fn check_password(
        &self,
        name: &RoomName,
        password: &Password,
    ) -> Result<bool, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .rooms
            .get(name)
            .is_some_and(|room| room.password == *password))
    }

    async fn append_message(
        &self,
        room: &RoomName,
        client_id: &ClientId,
        body: &str,
    ) -> Result<(), StoreError> {
        let message = StoredMessage {
            room: room.clone(),
            client_id: client_id.clone(),
            body: body.to_string(),
            sent_at: Timestamp::new(self.clock.now_millis()),
        };
        let mut state = self.state.lock().await;
        state.messages.entry(room.clone()).or_default().push(message);
        Ok(())
    }

    async fn recent_messages(
        &self,
        room: &RoomName,
        limit: usize,
    ) -> Result<Vec<StoredMessage>, StoreError> {
        let state = self.state.lock().await;
        let Some(messages) = state.messages.get(room) else {
            return Ok(Vec::new());
        };
        let start = messages.len().saturating_sub(limit);
        Ok(messages[start..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomcast_shared::time::FixedClock;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - ルームの作成・存在確認・パスワード照合
    // - メッセージの追加と直近 N 件の取得（古い順）
    //
    // 【なぜこのテストが必要か】
    // - Access Controller と Connection Session はこのストアの振る舞いに依存する
    // - ルーム名の重複時にパスワードが上書きされないことを保証する必要がある
    // ========================================

    fn room(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    fn password(value: &str) -> Password {
        Password::new(value.to_string()).unwrap()
    }

    fn client(id: &str) -> ClientId {
        ClientId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_create_room_and_check_password() {
        // テスト項目: ルームを作成すると存在確認とパスワード照合ができる
        // given (前提条件):
        let store = InMemoryChatStore::with_clock(Arc::new(FixedClock::new(1000)));

        // when (操作):
        store
            .create_room_record(&room("alpha"), &password("secret"))
            .await
            .unwrap();

        // then (期待する結果):
        assert!(store.room_exists(&room("alpha")).await.unwrap());
        assert!(!store.room_exists(&room("ghost")).await.unwrap());
        assert!(
            store
                .check_password(&room("alpha"), &password("secret"))
                .await
                .unwrap()
        );
        assert!(
            !store
                .check_password(&room("alpha"), &password("wrong"))
                .await
                .unwrap()
        );
        let record = store.room(&room("alpha")).await.unwrap();
        assert_eq!(record.created_at, Timestamp::new(1000));
    }

    #[tokio::test]
    async fn test_create_duplicate_room_keeps_first_password() {
        // テスト項目: 同名ルームの作成は失敗し、元のパスワードが保持される
        // given (前提条件):
        let store = InMemoryChatStore::new();
        store
            .create_room_record(&room("alpha"), &password("secret"))
            .await
            .unwrap();

        // when (操作):
        let result = store
            .create_room_record(&room("alpha"), &password("other"))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(StoreError::RoomAlreadyExists("alpha".to_string()))
        );
        let record = store.room(&room("alpha")).await.unwrap();
        assert_eq!(record.password, password("secret"));
    }

    #[tokio::test]
    async fn test_check_password_for_unknown_room_is_false() {
        // テスト項目: 存在しないルームのパスワード照合は false になる
        // given (前提条件):
        let store = InMemoryChatStore::new();

        // when (操作):
        let result = store.check_password(&room("ghost"), &password("x")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(false));
    }

    #[tokio::test]
    async fn test_recent_messages_returns_last_n_oldest_first() {
        // テスト項目: 直近 N 件のメッセージが古い順で返される
        // given (前提条件):
        let store = InMemoryChatStore::new();
        for i in 0..25 {
            store
                .append_message(&room("alpha"), &client("1"), &format!("m{}", i))
                .await
                .unwrap();
        }

        // when (操作):
        let messages = store.recent_messages(&room("alpha"), 20).await.unwrap();

        // then (期待する結果):
        assert_eq!(messages.len(), 20);
        assert_eq!(messages[0].body, "m5");
        assert_eq!(messages[19].body, "m24");
    }

    #[tokio::test]
    async fn test_recent_messages_are_scoped_per_room() {
        // テスト項目: メッセージ履歴はルームごとに分離される
        // given (前提条件):
        let store = InMemoryChatStore::new();
        store
            .append_message(&room("alpha"), &client("1"), "in alpha")
            .await
            .unwrap();
        store
            .append_message(&room("beta"), &client("2"), "in beta")
            .await
            .unwrap();

        // when (操作):
        let alpha = store.recent_messages(&room("alpha"), 20).await.unwrap();
        let empty = store.recent_messages(&room("gamma"), 20).await.unwrap();

        // then (期待する結果):
        assert_eq!(alpha.len(), 1);
        assert_eq!(alpha[0].body, "in alpha");
        assert_eq!(alpha[0].client_id, client("1"));
        assert!(empty.is_empty());
    }
}
