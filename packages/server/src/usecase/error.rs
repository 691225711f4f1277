//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::StoreError;

/// ルーム作成のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRoomError {
    /// 同名のルームが既に存在する
    #[error("room '{0}' already exists")]
    RoomAlreadyExists(String),

    /// ストアへのアクセスに失敗した
    #[error("store error: {0}")]
    Store(String),
}

impl From<StoreError> for CreateRoomError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::RoomAlreadyExists(name) => Self::RoomAlreadyExists(name),
            StoreError::Unavailable(msg) => Self::Store(msg),
        }
    }
}

/// 入室可否判定のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// ルームが存在しない
    #[error("room '{0}' not found")]
    RoomNotFound(String),

    /// パスワードが一致しない
    #[error("incorrect password for room '{0}'")]
    Forbidden(String),

    /// ストアへのアクセスに失敗した
    #[error("store error: {0}")]
    Store(String),
}

impl From<StoreError> for AccessError {
    fn from(e: StoreError) -> Self {
        Self::Store(e.to_string())
    }
}

/// セッション切断のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    /// セッションがルームに登録されていない
    #[error("session is not attached to room '{0}'")]
    NotAttached(String),
}
