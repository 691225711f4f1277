//! Broadcast Engine
//!
//! Fans a text out to every session in a room's membership snapshot. Delivery
//! means enqueueing on the session's outbound queue; the session's writer task
//! drains that queue into the socket in FIFO order.
//!
//! A target whose writer has gone away is logged and skipped. It never aborts
//! the rest of the fan-out and is never reported to the caller as an error;
//! that session's own loops end and detach it.

use std::sync::Arc;

use crate::domain::RoomName;

use super::registry::RoomRegistry;

/// Outcome of one broadcast call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Sessions whose queue accepted the text
    pub delivered: usize,
    /// Sessions whose queue was already closed
    pub failed: usize,
}

/// Delivers texts to every member of a room.
#[derive(Clone)]
pub struct Broadcaster {
    registry: Arc<RoomRegistry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Deliver `text` to every session currently attached to `room`.
    pub async fn broadcast(&self, room: &RoomName, text: &str) -> BroadcastReport {
        let targets = self.registry.sessions_of(room).await;
        let mut report = BroadcastReport::default();

        for target in &targets {
            match target.push(text) {
                Ok(()) => report.delivered += 1,
                Err(_) => {
                    report.failed += 1;
                    tracing::warn!(
                        "Failed to push message to {} (client '{}') in room '{}', skipping",
                        target.id(),
                        target.client_id(),
                        room
                    );
                }
            }
        }

        tracing::debug!(
            "Broadcasted to room '{}': delivered={}, failed={}",
            room,
            report.delivered,
            report.failed
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClientId, SessionHandle, SessionIdFactory};
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - ルームの全メンバーへの配信
    // - 一部のメンバーの送信失敗が他のメンバーへの配信を妨げないこと
    // - 同じ送信者の連続したブロードキャストの順序が保たれること
    // ========================================

    fn room(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    async fn attach(
        registry: &RoomRegistry,
        factory: &SessionIdFactory,
        room_name: &str,
        client_id: &str,
    ) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = SessionHandle::new(
            factory.generate(),
            ClientId::new(client_id.to_string()).unwrap(),
            tx,
        );
        registry.attach(&room(room_name), handle).await;
        rx
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_member_of_room_only() {
        // テスト項目: ルームの全メンバーに配信され、他のルームには配信されない
        // given (前提条件):
        let registry = Arc::new(RoomRegistry::new());
        let factory = SessionIdFactory::new();
        let mut alice = attach(&registry, &factory, "alpha", "1").await;
        let mut bob = attach(&registry, &factory, "alpha", "2").await;
        let mut carol = attach(&registry, &factory, "beta", "3").await;
        let broadcaster = Broadcaster::new(Arc::clone(&registry));

        // when (操作):
        let report = broadcaster.broadcast(&room("alpha"), "Client #1: hi").await;

        // then (期待する結果):
        assert_eq!(
            report,
            BroadcastReport {
                delivered: 2,
                failed: 0
            }
        );
        assert_eq!(alice.recv().await.as_deref(), Some("Client #1: hi"));
        assert_eq!(bob.recv().await.as_deref(), Some("Client #1: hi"));
        assert!(carol.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_isolates_closed_target() {
        // テスト項目: 切断済みのメンバーがいても他のメンバーには配信される
        // given (前提条件):
        let registry = Arc::new(RoomRegistry::new());
        let factory = SessionIdFactory::new();
        let closed = attach(&registry, &factory, "alpha", "1").await;
        let mut bob = attach(&registry, &factory, "alpha", "2").await;
        drop(closed);
        let broadcaster = Broadcaster::new(Arc::clone(&registry));

        // when (操作):
        let report = broadcaster.broadcast(&room("alpha"), "Client #2: hi").await;

        // then (期待する結果):
        assert_eq!(
            report,
            BroadcastReport {
                delivered: 1,
                failed: 1
            }
        );
        assert_eq!(bob.recv().await.as_deref(), Some("Client #2: hi"));
    }

    #[tokio::test]
    async fn test_broadcast_to_unknown_room_is_noop() {
        // テスト項目: メンバーのいないルームへのブロードキャストはエラーにならない
        // given (前提条件):
        let broadcaster = Broadcaster::new(Arc::new(RoomRegistry::new()));

        // when (操作):
        let report = broadcaster.broadcast(&room("ghost"), "anything").await;

        // then (期待する結果):
        assert_eq!(report, BroadcastReport::default());
    }

    #[tokio::test]
    async fn test_successive_broadcasts_preserve_order() {
        // テスト項目: 連続したブロードキャストは各受信者に送信順で届く
        // given (前提条件):
        let registry = Arc::new(RoomRegistry::new());
        let factory = SessionIdFactory::new();
        let mut alice = attach(&registry, &factory, "alpha", "1").await;
        let mut bob = attach(&registry, &factory, "alpha", "2").await;
        let broadcaster = Broadcaster::new(Arc::clone(&registry));

        // when (操作):
        for i in 0..50 {
            broadcaster
                .broadcast(&room("alpha"), &format!("Client #1: m{}", i))
                .await;
        }

        // then (期待する結果):
        for i in 0..50 {
            let expected = format!("Client #1: m{}", i);
            assert_eq!(alice.recv().await, Some(expected.clone()));
            assert_eq!(bob.recv().await, Some(expected));
        }
    }

    #[tokio::test]
    async fn test_sessions_sharing_client_id_both_receive() {
        // テスト項目: 同じクライアント ID の 2 セッションは両方ともメッセージを受信する
        // given (前提条件):
        let registry = Arc::new(RoomRegistry::new());
        let factory = SessionIdFactory::new();
        let mut first = attach(&registry, &factory, "alpha", "7").await;
        let mut second = attach(&registry, &factory, "alpha", "7").await;
        let broadcaster = Broadcaster::new(Arc::clone(&registry));

        // when (操作):
        let report = broadcaster.broadcast(&room("alpha"), "Client #7 joined").await;

        // then (期待する結果):
        assert_eq!(report.delivered, 2);
        assert_eq!(first.recv().await.as_deref(), Some("Client #7 joined"));
        assert_eq!(second.recv().await.as_deref(), Some("Client #7 joined"));
    }
}
