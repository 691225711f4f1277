//! UseCase: セッション接続処理
//!
//! 1. Registry にセッションを登録（attach）
//! 2. 直近の履歴を古い順にこのセッションだけへ送る
//! 3. 入室通知をルーム全体にブロードキャスト
//!
//! 履歴の取得に失敗しても接続は継続します（履歴なしで参加）。

use std::sync::Arc;

use roomcast_shared::wire;

use crate::{
    domain::{
        ChatStore, ClientId, HISTORY_REPLAY_LIMIT, Outbox, RoomName, SessionHandle, SessionId,
        SessionIdFactory,
    },
    infrastructure::{Broadcaster, RoomRegistry},
};

/// セッション接続のユースケース
pub struct ConnectSessionUseCase {
    registry: Arc<RoomRegistry>,
    broadcaster: Broadcaster,
    store: Arc<dyn ChatStore>,
    session_ids: SessionIdFactory,
    /// 入室時に再送する履歴の件数
    history_limit: usize,
}

impl ConnectSessionUseCase {
    /// 新しい ConnectSessionUseCase を作成
    pub fn new(
        registry: Arc<RoomRegistry>,
        broadcaster: Broadcaster,
        store: Arc<dyn ChatStore>,
    ) -> Self {
        Self {
            registry,
            broadcaster,
            store,
            session_ids: SessionIdFactory::new(),
            history_limit: HISTORY_REPLAY_LIMIT,
        }
    }

    /// 再送する履歴の件数を変更
    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    /// セッション接続を実行
    ///
    /// # Arguments
    ///
    /// * `room` - 参加するルーム
    /// * `client_id` - 呼び出し元が指定したクライアント ID（重複を許容）
    /// * `outbox` - このセッションの送信キュー
    ///
    /// # Returns
    ///
    /// 新しく採番したセッション ID
    pub async fn execute(&self, room: &RoomName, client_id: ClientId, outbox: Outbox) -> SessionId {
        let session_id = self.session_ids.generate();
        let session = SessionHandle::new(session_id, client_id.clone(), outbox);

        // 1. Registry に登録
        self.registry.attach(room, session.clone()).await;
        tracing::info!(
            "Client '{}' attached to room '{}' as {}",
            client_id,
            room,
            session_id
        );

        // 2. 履歴の再送（このセッションのみ）
        let replayed = self.replay_history(room, &session).await;
        tracing::debug!("Replayed {} messages to {}", replayed, session_id);

        // 3. 入室通知
        self.broadcaster
            .broadcast(room, &wire::joined_line(client_id.as_str()))
            .await;

        session_id
    }

    async fn replay_history(&self, room: &RoomName, session: &SessionHandle) -> usize {
        let history = match self.store.recent_messages(room, self.history_limit).await {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!("Failed to load history for room '{}': {}", room, e);
                return 0;
            }
        };

        let mut replayed = 0;
        for message in &history {
            let line = wire::chat_line(message.client_id.as_str(), &message.body);
            if session.push(&line).is_err() {
                tracing::warn!("{} closed during history replay", session.id());
                break;
            }
            replayed += 1;
        }
        replayed
    }
}
