//! Request/response bodies of the control API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/create-room` and `POST /api/join-room`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCredentialsRequest {
    pub room_name: String,
    pub password: String,
}

/// Successful control API response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Failed control API response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Live room summary returned by `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub members: Vec<String>,
}
