//! Control API calls (`/api/create-room`, `/api/join-room`).

use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    room_name: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// HTTP client for the server's control API
#[derive(Debug, Clone)]
pub struct ControlApi {
    base_url: String,
    http: reqwest::Client,
}

impl ControlApi {
    /// `base_url` is the server origin, e.g. `http://127.0.0.1:8080`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Create `room_name` protected by `password`.
    pub async fn create_room(&self, room_name: &str, password: &str) -> Result<(), ClientError> {
        let response = self.post("/api/create-room", room_name, password).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = Self::detail(response).await;
        match status {
            StatusCode::BAD_REQUEST => Err(ClientError::RoomAlreadyExists(detail)),
            _ => Err(ClientError::Http(format!("{}: {}", status, detail))),
        }
    }

    /// Check that `room_name` exists and `password` matches.
    pub async fn join_room(&self, room_name: &str, password: &str) -> Result<(), ClientError> {
        let response = self.post("/api/join-room", room_name, password).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        match status {
            StatusCode::NOT_FOUND => Err(ClientError::RoomNotFound(room_name.to_string())),
            StatusCode::FORBIDDEN => Err(ClientError::Forbidden(room_name.to_string())),
            _ => {
                let detail = Self::detail(response).await;
                Err(ClientError::Http(format!("{}: {}", status, detail)))
            }
        }
    }

    /// WebSocket URL of the attach endpoint for `room_name` / `client_id`.
    ///
    /// Both values are percent-encoded as single path segments.
    pub fn websocket_url(
        &self,
        room_name: &str,
        client_id: &str,
    ) -> Result<String, ClientError> {
        let invalid = || ClientError::InvalidServerUrl(self.base_url.clone());

        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        let scheme = match url.scheme() {
            "https" | "wss" => "wss",
            "http" | "ws" => "ws",
            _ => return Err(invalid()),
        };
        url.set_scheme(scheme).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .push("ws")
            .push(room_name)
            .push(client_id);

        Ok(url.to_string())
    }

    async fn post(
        &self,
        path: &str,
        room_name: &str,
        password: &str,
    ) -> Result<reqwest::Response, ClientError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(&Credentials {
                room_name,
                password,
            })
            .send()
            .await?;
        Ok(response)
    }

    async fn detail(response: reqwest::Response) -> String {
        match response.json::<ErrorBody>().await {
            Ok(body) => body.detail,
            Err(_) => "no detail".to_string(),
        }
    }
}
