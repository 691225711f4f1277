//! UseCase: ルーム作成・入室可否の判定（Room Access Controller）
//!
//! 作成・入室 API からのみ使われます。WebSocket の attach はこの判定を
//! 再実行せず、呼び出し元を信頼します。

use std::sync::Arc;

use crate::domain::{ChatStore, Password, RoomName};

use super::error::{AccessError, CreateRoomError};

/// Room Access Controller
pub struct RoomAccessController {
    /// 永続化ゲートウェイ
    store: Arc<dyn ChatStore>,
}

impl RoomAccessController {
    /// 新しい RoomAccessController を作成
    pub fn new(store: Arc<dyn ChatStore>) -> Self {
        Self { store }
    }

    /// ルームを作成
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 作成成功
    /// * `Err(CreateRoomError::RoomAlreadyExists)` - 同名のルームが存在する（パスワードは変更されない）
    /// * `Err(CreateRoomError::Store)` - ストアへのアクセスに失敗
    pub async fn create_room(
        &self,
        name: &RoomName,
        password: &Password,
    ) -> Result<(), CreateRoomError> {
        if self.store.room_exists(name).await? {
            return Err(CreateRoomError::RoomAlreadyExists(
                name.as_str().to_string(),
            ));
        }

        // 並行した作成はストア側の一意制約で RoomAlreadyExists になる
        self.store.create_room_record(name, password).await?;
        tracing::info!("Room '{}' created", name);
        Ok(())
    }

    /// 入室可否を判定
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 入室許可
    /// * `Err(AccessError::RoomNotFound)` - ルームが存在しない
    /// * `Err(AccessError::Forbidden)` - パスワードが一致しない
    /// * `Err(AccessError::Store)` - ストアへのアクセスに失敗
    pub async fn verify(&self, name: &RoomName, password: &Password) -> Result<(), AccessError> {
        if !self.store.room_exists(name).await? {
            return Err(AccessError::RoomNotFound(name.as_str().to_string()));
        }
        if !self.store.check_password(name, password).await? {
            return Err(AccessError::Forbidden(name.as_str().to_string()));
        }
        Ok(())
    }
}
