//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use crate::error::ClientError;

/// Upper bound (exclusive) of generated client ids
const CLIENT_ID_SPACE: u128 = 10_000;

/// Check if the client should exit immediately based on the error type.
///
/// Access failures (unknown room, wrong password, creation refused) and a
/// malformed server URL will not change on retry, so the client gives up
/// right away.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::RoomNotFound(_)
            | ClientError::Forbidden(_)
            | ClientError::RoomAlreadyExists(_)
            | ClientError::InvalidServerUrl(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}

/// Generate a numeric client id for one session.
pub fn generate_client_id() -> String {
    (uuid::Uuid::new_v4().as_u128() % CLIENT_ID_SPACE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_exit_immediately_with_access_errors() {
        // テスト項目: 入室できないエラーの場合、即座に終了すべきと判定される
        // given (前提条件):
        let errors = [
            ClientError::RoomNotFound("ghost".to_string()),
            ClientError::Forbidden("alpha".to_string()),
            ClientError::RoomAlreadyExists("Room name already taken".to_string()),
            ClientError::InvalidServerUrl("ftp://127.0.0.1".to_string()),
        ];

        // when (操作):
        let results: Vec<bool> = errors.iter().map(should_exit_immediately).collect();

        // then (期待する結果):
        assert_eq!(results, vec![true, true, true, true]);
    }

    #[test]
    fn test_should_exit_immediately_with_connection_error() {
        // テスト項目: ConnectionError の場合、即座に終了すべきではないと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_with_forbidden() {
        // テスト項目: パスワード不一致の場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = ClientError::Forbidden("alpha".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 0, 5);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_within_limit() {
        // テスト項目: 再接続回数が上限未満の場合、再接続すべきと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let first = should_attempt_reconnect(&error, 0, 5);
        let last = should_attempt_reconnect(&error, 4, 5);

        // then (期待する結果):
        assert!(first);
        assert!(last);
    }

    #[test]
    fn test_should_attempt_reconnect_at_limit() {
        // テスト項目: 再接続回数が上限に達した場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = ClientError::Http("500 Internal Server Error".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 5, 5);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_generate_client_id_is_small_number() {
        // テスト項目: 生成されるクライアント ID は 0〜9999 の数値である
        // given (前提条件):

        // when (操作):
        let ids: Vec<String> = (0..100).map(|_| generate_client_id()).collect();

        // then (期待する結果):
        for id in ids {
            let value: u32 = id.parse().unwrap();
            assert!(value < 10_000);
        }
    }
}
