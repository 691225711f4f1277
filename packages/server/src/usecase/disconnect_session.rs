//! UseCase: セッション切断処理
//!
//! Registry から登録解除した後、退室通知を残りのメンバーにブロードキャストします。
//! 登録解除できたときだけ通知するため、1 セッションにつき退室通知は 1 回です。

use std::sync::Arc;

use roomcast_shared::wire;

use crate::{
    domain::{ClientId, RoomName, SessionId},
    infrastructure::{BroadcastReport, Broadcaster, RoomRegistry},
};

use super::error::DisconnectError;

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    registry: Arc<RoomRegistry>,
    broadcaster: Broadcaster,
}

impl DisconnectSessionUseCase {
    /// 新しい DisconnectSessionUseCase を作成
    pub fn new(registry: Arc<RoomRegistry>, broadcaster: Broadcaster) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    /// セッション切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(BroadcastReport)` - 退室通知の配信結果
    /// * `Err(DisconnectError::NotAttached)` - セッションが登録されていなかった（通知しない）
    pub async fn execute(
        &self,
        room: &RoomName,
        session_id: SessionId,
        client_id: &ClientId,
    ) -> Result<BroadcastReport, DisconnectError> {
        if !self.registry.detach(room, session_id).await {
            return Err(DisconnectError::NotAttached(room.as_str().to_string()));
        }
        tracing::info!(
            "Client '{}' ({}) detached from room '{}'",
            client_id,
            session_id,
            room
        );

        Ok(self
            .broadcaster
            .broadcast(room, &wire::left_line(client_id.as_str()))
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SessionHandle, SessionIdFactory};
    use tokio::sync::mpsc;

    fn room(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    fn client(id: &str) -> ClientId {
        ClientId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_disconnect_detaches_and_announces_once() {
        // テスト項目: 切断するとメンバーから外れ、退室通知は 1 回だけ届く
        // given (前提条件):
        let registry = Arc::new(RoomRegistry::new());
        let factory = SessionIdFactory::new();
        let (alice_tx, _alice_rx) = mpsc::unbounded_channel();
        let (bob_tx, mut bob_rx) = mpsc::unbounded_channel();
        let alice = SessionHandle::new(factory.generate(), client("1"), alice_tx);
        let bob = SessionHandle::new(factory.generate(), client("2"), bob_tx);
        registry.attach(&room("alpha"), alice.clone()).await;
        registry.attach(&room("alpha"), bob).await;
        let usecase =
            DisconnectSessionUseCase::new(Arc::clone(&registry), Broadcaster::new(registry.clone()));

        // when (操作):
        let first = usecase.execute(&room("alpha"), alice.id(), &client("1")).await;
        let second = usecase.execute(&room("alpha"), alice.id(), &client("1")).await;

        // then (期待する結果):
        assert_eq!(first.map(|report| report.delivered), Ok(1));
        assert_eq!(
            second,
            Err(DisconnectError::NotAttached("alpha".to_string()))
        );
        assert_eq!(bob_rx.recv().await.as_deref(), Some("Client #1 left"));
        assert!(bob_rx.try_recv().is_err());
        let snapshot = registry.sessions_of(&room("alpha")).await;
        assert!(snapshot.iter().all(|s| s.id() != alice.id()));
    }
}
