use std::sync::Arc;

use crate::browser::UrlParams;
use crate::error::AppError;
use crate::models::{RoomFormData, RoomPrefill};
use crate::storage::{KeyValueStore, USER_NAME_KEY};
use crate::ui::{RoomAction, RoomModal};

/// URL query parameter remembering the last room joined
pub const ROOM_NAME_PARAM: &str = "roomName";

/// Prompts for identity and room name
pub struct RoomSelector {
    store: Arc<dyn KeyValueStore>,
    params: UrlParams,
}

impl RoomSelector {
    pub fn new(store: Arc<dyn KeyValueStore>, params: UrlParams) -> Self {
        Self { store, params }
    }

    /// Page URL params, updated with the last submitted room name
    pub fn params(&self) -> &UrlParams {
        &self.params
    }

    /// Show the room form with `prior_error` rendered, if any.
    ///
    /// Returns `None` when the user asks to reconfigure devices. Submissions
    /// with an empty identity or room name are re-prompted, never returned.
    pub async fn select_room(
        &mut self,
        modal: &mut dyn RoomModal,
        prior_error: Option<&AppError>,
    ) -> Option<RoomFormData> {
        let identity = match self.store.get(USER_NAME_KEY).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored identity");
                None
            }
        };
        let mut prefill = RoomPrefill {
            identity,
            room_name: self.params.get(ROOM_NAME_PARAM).map(str::to_string),
        };
        let mut error = prior_error.cloned();

        loop {
            modal.show(&prefill, error.as_ref());
            let action = modal.next_action().await;
            modal.hide();

            let form = match action {
                RoomAction::ChangeDevices => {
                    tracing::debug!("Device reconfiguration requested");
                    return None;
                }
                RoomAction::Join(form) => form,
            };

            match form.validated() {
                Ok(form) => {
                    if let Err(e) = self.store.set(USER_NAME_KEY, &form.identity).await {
                        tracing::warn!(error = %e, "Failed to persist identity");
                    }
                    self.params.insert(ROOM_NAME_PARAM, &form.room_name);
                    return Some(form);
                }
                Err(message) => {
                    tracing::debug!(message = %message, "Rejected room form");
                    prefill = RoomPrefill {
                        identity: Some(form.identity),
                        room_name: Some(form.room_name),
                    };
                    error = Some(AppError::InvalidRoomForm(message));
                }
            }
        }
    }
}
