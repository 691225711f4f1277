//! Control API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::{Password, RoomName},
    ui::{
        dto::{ErrorResponse, MessageResponse, RoomCredentialsRequest, RoomSummaryDto},
        state::AppState,
    },
    usecase::{AccessError, CreateRoomError},
};

/// Error response of the control API: a status code and a `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

fn message(text: &str) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: text.to_string(),
    })
}

/// `POST /api/create-room`
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RoomCredentialsRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let name = RoomName::try_from(request.room_name)
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;
    let password = Password::try_from(request.password)
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;

    match state.room_access.create_room(&name, &password).await {
        Ok(()) => Ok(message("Room Created!")),
        Err(CreateRoomError::RoomAlreadyExists(_)) => {
            tracing::info!("Rejected create-room for taken name '{}'", name);
            Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                "Room name already taken",
            ))
        }
        Err(CreateRoomError::Store(e)) => {
            tracing::error!("Failed to create room '{}': {}", name, e);
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create room",
            ))
        }
    }
}

/// `POST /api/join-room`
pub async fn join_room(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RoomCredentialsRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    // a name that can never be created cannot be found either
    let name = RoomName::try_from(request.room_name)
        .map_err(|_| ApiError::new(StatusCode::NOT_FOUND, "Room not found"))?;
    // an over-long password can never match
    let password = Password::try_from(request.password)
        .map_err(|_| ApiError::new(StatusCode::FORBIDDEN, "Incorrect password"))?;

    match state.room_access.verify(&name, &password).await {
        Ok(()) => Ok(message("Access Granted")),
        Err(AccessError::RoomNotFound(_)) => {
            Err(ApiError::new(StatusCode::NOT_FOUND, "Room not found"))
        }
        Err(AccessError::Forbidden(_)) => {
            tracing::info!("Rejected join-room for '{}': incorrect password", name);
            Err(ApiError::new(StatusCode::FORBIDDEN, "Incorrect password"))
        }
        Err(AccessError::Store(e)) => {
            tracing::error!("Failed to verify access to room '{}': {}", name, e);
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to verify room access",
            ))
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `GET /api/rooms`: rooms known to the registry with their live members
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let mut rooms = Vec::new();
    for name in state.registry.room_names().await {
        let members = state
            .registry
            .members(&name)
            .await
            .into_iter()
            .map(|id| id.into_string())
            .collect();
        rooms.push(RoomSummaryDto {
            name: name.into_string(),
            members,
        });
    }
    Json(rooms)
}
