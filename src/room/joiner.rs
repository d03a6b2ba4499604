use std::sync::Arc;

use crate::error::{JoinError, Result};
use crate::models::ConnectOptions;
use crate::sdk::{RoomEnd, VideoSdk};

/// Connects to a room and waits out the session
pub struct RoomJoiner {
    sdk: Arc<dyn VideoSdk>,
}

impl RoomJoiner {
    pub fn new(sdk: Arc<dyn VideoSdk>) -> Self {
        Self { sdk }
    }

    /// Join with `token` and `options`. Resolves when the local participant
    /// has left the room, not when it joined.
    pub async fn join_room(&self, token: &str, options: &ConnectOptions) -> Result<RoomEnd> {
        let session = self
            .sdk
            .connect(token, options)
            .await
            .map_err(JoinError::Connect)?;

        tracing::info!(
            room_sid = %session.sid(),
            room_name = %session.name(),
            identity = %session.local_identity(),
            "Joined room"
        );

        let room_name = session.name().to_string();
        let end = session.ended().await;
        match end.error {
            Some(e) => {
                tracing::warn!(room_name = %room_name, error = %e, "Disconnected from room");
                Err(JoinError::Disconnected(e).into())
            }
            None => {
                tracing::info!(room_name = %room_name, "Left room");
                Ok(end)
            }
        }
    }
}
