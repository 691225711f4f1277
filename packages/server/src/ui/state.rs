//! Server state shared by all handlers.

use std::sync::Arc;

use crate::{
    domain::ChatStore,
    infrastructure::{Broadcaster, RoomRegistry},
    usecase::{
        ConnectSessionUseCase, DisconnectSessionUseCase, RoomAccessController, SendMessageUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// Room Access Controller（作成・入室 API）
    pub room_access: RoomAccessController,
    /// ConnectSessionUseCase（セッション接続のユースケース）
    pub connect_session_usecase: ConnectSessionUseCase,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: SendMessageUseCase,
    /// DisconnectSessionUseCase（セッション切断のユースケース）
    pub disconnect_session_usecase: DisconnectSessionUseCase,
    /// Room Registry（ルーム一覧 API 用）
    pub registry: Arc<RoomRegistry>,
}

impl AppState {
    /// Wire the registry, broadcaster and use cases around `store`.
    pub fn new(store: Arc<dyn ChatStore>, history_limit: usize) -> Self {
        let registry = Arc::new(RoomRegistry::new());
        let broadcaster = Broadcaster::new(Arc::clone(&registry));

        Self {
            room_access: RoomAccessController::new(Arc::clone(&store)),
            connect_session_usecase: ConnectSessionUseCase::new(
                Arc::clone(&registry),
                broadcaster.clone(),
                Arc::clone(&store),
            )
            .with_history_limit(history_limit),
            send_message_usecase: SendMessageUseCase::new(broadcaster.clone(), store),
            disconnect_session_usecase: DisconnectSessionUseCase::new(
                Arc::clone(&registry),
                broadcaster,
            ),
            registry,
        }
    }
}
