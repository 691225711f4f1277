//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The room does not exist (404 from the join API)
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    /// The password did not match (403 from the join API)
    #[error("Incorrect password for room '{0}'")]
    Forbidden(String),

    /// The room name is taken or invalid (400 from the create API)
    #[error("Cannot create room: {0}")]
    RoomAlreadyExists(String),

    /// The server origin is not an http(s) URL
    #[error("Invalid server URL: {0}")]
    InvalidServerUrl(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Unexpected control API failure
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ClientError::ConnectionError(e.to_string())
        } else {
            ClientError::Http(e.to_string())
        }
    }
}
