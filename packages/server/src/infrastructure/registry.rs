//! Room Registry
//!
//! Maps room name → set of live session handles. The registry's membership is
//! the sole authority on who receives a room's broadcasts.
//!
//! ## Locking
//!
//! The outer map lock is held only long enough to find or create a room's
//! entry. Membership itself lives behind one lock per room, so attach/detach
//! and snapshots in different rooms never contend with each other.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::domain::{ClientId, RoomName, SessionHandle, SessionId};

type Members = Arc<Mutex<HashMap<SessionId, SessionHandle>>>;

/// Room name → live sessions.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: Mutex<HashMap<RoomName, Members>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    async fn members_or_create(&self, room: &RoomName) -> Members {
        let mut rooms = self.rooms.lock().await;
        Arc::clone(rooms.entry(room.clone()).or_default())
    }

    async fn members_of(&self, room: &RoomName) -> Option<Members> {
        let rooms = self.rooms.lock().await;
        rooms.get(room).map(Arc::clone)
    }

    /// Register `session` under `room`, creating the room entry if absent.
    ///
    /// Membership is keyed by session id: attaching the same session twice
    /// replaces the earlier handle instead of duplicating delivery.
    pub async fn attach(&self, room: &RoomName, session: SessionHandle) {
        let members = self.members_or_create(room).await;
        let mut members = members.lock().await;
        let session_id = session.id();
        if members.insert(session_id, session).is_some() {
            tracing::debug!("{} re-attached to room '{}'", session_id, room);
        } else {
            tracing::debug!("{} attached to room '{}'", session_id, room);
        }
    }

    /// Remove the session from `room`. Returns `false` if it was not a member.
    ///
    /// The room entry stays even when it becomes empty.
    pub async fn detach(&self, room: &RoomName, session_id: SessionId) -> bool {
        let Some(members) = self.members_of(room).await else {
            return false;
        };
        let removed = members.lock().await.remove(&session_id).is_some();
        if removed {
            tracing::debug!("{} detached from room '{}'", session_id, room);
        }
        removed
    }

    /// Snapshot of the sessions currently in `room` (empty if unknown).
    ///
    /// The snapshot is a copy, so concurrent attach/detach cannot disturb a
    /// broadcast iterating over it.
    pub async fn sessions_of(&self, room: &RoomName) -> Vec<SessionHandle> {
        let Some(members) = self.members_of(room).await else {
            return Vec::new();
        };
        let members = members.lock().await;
        members.values().cloned().collect()
    }

    /// Number of sessions currently in `room`.
    pub async fn member_count(&self, room: &RoomName) -> usize {
        match self.members_of(room).await {
            Some(members) => members.lock().await.len(),
            None => 0,
        }
    }

    /// Client ids of the sessions currently in `room`, sorted.
    ///
    /// Duplicates are kept: client ids are not unique.
    pub async fn members(&self, room: &RoomName) -> Vec<ClientId> {
        let mut client_ids: Vec<ClientId> = self
            .sessions_of(room)
            .await
            .iter()
            .map(|session| session.client_id().clone())
            .collect();
        client_ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        client_ids
    }

    /// Names of every room that has ever had a session attached, sorted.
    pub async fn room_names(&self) -> Vec<RoomName> {
        let rooms = self.rooms.lock().await;
        let mut names: Vec<RoomName> = rooms.keys().cloned().collect();
        names.sort();
        names
    }
}
