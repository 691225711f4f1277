//! Domain error types.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("room name must not be empty")]
    RoomNameEmpty,

    #[error("room name must be at most {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    #[error("room name must not contain '/'")]
    RoomNameInvalidCharacter,

    #[error("client id must not be empty")]
    ClientIdEmpty,

    #[error("client id must be at most {max} characters (got {actual})")]
    ClientIdTooLong { max: usize, actual: usize },

    #[error("password must be at most {max} characters (got {actual})")]
    PasswordTooLong { max: usize, actual: usize },
}

/// Persistence gateway errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A room with the same name is already recorded.
    #[error("room '{0}' already exists")]
    RoomAlreadyExists(String),

    /// The backing store could not be reached or the query failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
