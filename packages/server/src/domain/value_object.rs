//! Value objects.
//!
//! Each type validates its invariants on construction, so code holding one can
//! rely on it being well-formed.

use std::fmt;

use super::error::ValueObjectError;

/// Room names are a primary key of at most this many characters.
pub const ROOM_NAME_MAX_LEN: usize = 50;
/// Client ids are stored next to each message with this width.
pub const CLIENT_ID_MAX_LEN: usize = 50;
/// Room passwords are stored with this width.
pub const PASSWORD_MAX_LEN: usize = 50;

/// Unique name of a room.
///
/// Used as a path segment of the WebSocket endpoint, so it must not contain `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::RoomNameEmpty);
        }
        let len = value.chars().count();
        if len > ROOM_NAME_MAX_LEN {
            return Err(ValueObjectError::RoomNameTooLong {
                max: ROOM_NAME_MAX_LEN,
                actual: len,
            });
        }
        if value.contains('/') {
            return Err(ValueObjectError::RoomNameInvalidCharacter);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-supplied client identifier.
///
/// Not unique: two sessions may present the same id at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::ClientIdEmpty);
        }
        let len = value.chars().count();
        if len > CLIENT_ID_MAX_LEN {
            return Err(ValueObjectError::ClientIdTooLong {
                max: CLIENT_ID_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ClientId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared room password, compared by exact string equality.
///
/// `Debug` is redacted so passwords never reach the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let len = value.chars().count();
        if len > PASSWORD_MAX_LEN {
            return Err(ValueObjectError::PasswordTooLong {
                max: PASSWORD_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Password {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
