//! UseCase: メッセージ送信処理
//!
//! 受信したメッセージをルーム全体（送信者を含む）にブロードキャストし、
//! 永続化はバックグラウンドの書き込みタスクで行います（fire-and-forget）。
//! 書き込みタスクは 1 つのキューを順番に処理するため、保存順は受信順と一致します。

use std::sync::Arc;

use roomcast_shared::wire;
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::{ChatStore, ClientId, RoomName},
    infrastructure::{BroadcastReport, Broadcaster},
};

/// 書き込みタスクに渡す保存依頼
struct PendingAppend {
    room: RoomName,
    client_id: ClientId,
    body: String,
    done: oneshot::Sender<()>,
}

/// 送信結果
pub struct SentMessage {
    /// ブロードキャストの結果
    pub report: BroadcastReport,
    /// 保存の完了通知。待つ必要はない（失敗はログに記録される）
    pub persistence: oneshot::Receiver<()>,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    broadcaster: Broadcaster,
    appends: mpsc::UnboundedSender<PendingAppend>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    ///
    /// 書き込みタスクを起動するため、Tokio ランタイム上で呼び出す必要があります。
    pub fn new(broadcaster: Broadcaster, store: Arc<dyn ChatStore>) -> Self {
        let (appends, rx) = mpsc::unbounded_channel();
        tokio::spawn(append_loop(store, rx));
        Self {
            broadcaster,
            appends,
        }
    }

    /// メッセージ送信を実行
    ///
    /// 呼び出し元（セッションの受信ループ）はこの関数の完了を待ってから次の
    /// フレームを読むため、同じ送信者のメッセージは送信順に配信・保存されます。
    pub async fn execute(&self, room: &RoomName, client_id: &ClientId, body: &str) -> SentMessage {
        let (done, persistence) = oneshot::channel();
        let pending = PendingAppend {
            room: room.clone(),
            client_id: client_id.clone(),
            body: body.to_string(),
            done,
        };
        if self.appends.send(pending).is_err() {
            tracing::warn!(
                "Store writer has stopped; message from '{}' in room '{}' is not saved",
                client_id,
                room
            );
        }

        let report = self
            .broadcaster
            .broadcast(room, &wire::chat_line(client_id.as_str(), body))
            .await;

        SentMessage {
            report,
            persistence,
        }
    }
}

/// 保存依頼を受信順に 1 件ずつストアへ書き込む
async fn append_loop(
    store: Arc<dyn ChatStore>,
    mut rx: mpsc::UnboundedReceiver<PendingAppend>,
) {
    while let Some(pending) = rx.recv().await {
        if let Err(e) = store
            .append_message(&pending.room, &pending.client_id, &pending.body)
            .await
        {
            tracing::warn!(
                "Failed to save message from '{}' in room '{}': {}",
                pending.client_id,
                pending.room,
                e
            );
        }
        let _ = pending.done.send(());
    }
}
