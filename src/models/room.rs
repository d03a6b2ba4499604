use serde::{Deserialize, Serialize};

/// Submitted room selection form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomFormData {
    pub identity: String,
    pub room_name: String,
}

impl RoomFormData {
    pub fn new(identity: impl Into<String>, room_name: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            room_name: room_name.into(),
        }
    }

    /// Trimmed copy, or a description of the first empty field
    pub fn validated(&self) -> Result<Self, String> {
        let identity = self.identity.trim();
        let room_name = self.room_name.trim();
        if identity.is_empty() {
            return Err("Please enter your name".to_string());
        }
        if room_name.is_empty() {
            return Err("Please enter a room name".to_string());
        }
        Ok(Self::new(identity, room_name))
    }
}

/// Values shown in the room form when it opens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomPrefill {
    pub identity: Option<String>,
    pub room_name: Option<String>,
}
