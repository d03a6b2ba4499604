//! The join flow as an explicit finite-state machine.
//!
//! ```text
//! CapabilityCheck ──unsupported──> FatalError
//!        │
//!        v
//! SelectMicrophone ──error──> RecoverableError
//!        │
//!        v
//! SelectCamera ──────error──> RecoverableError
//!        │
//!        v
//! SelectRoom <───────────────┐
//!   │   │ change devices     │ session ended / join failed
//!   │   └──> SelectMicrophone│
//!   v                        │
//! JoinRoom ──────────────────┘
//! ```

use std::sync::Arc;

use crate::browser::{Browser, UrlParams};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::media::{attach_level_meter, attach_video_preview, MediaSelector};
use crate::models::{ConnectOptions, DeviceIds, DeviceKind, RoomFormData};
use crate::room::{RoomJoiner, RoomSelector};
use crate::sdk::VideoSdk;
use crate::storage::{FileStore, KeyValueStore};
use crate::token::{HttpTokenClient, TokenSource};
use crate::ui::{show_error, DeviceModal, ErrorModal, RoomModal};

/// The four modal dialogs of the page
pub struct Modals {
    pub mic: Box<dyn DeviceModal>,
    pub camera: Box<dyn DeviceModal>,
    pub room: Box<dyn RoomModal>,
    pub error: Box<dyn ErrorModal>,
}

/// Everything the flow talks to, injected once at startup
pub struct Collaborators {
    pub sdk: Arc<dyn VideoSdk>,
    pub store: Arc<dyn KeyValueStore>,
    pub tokens: Arc<dyn TokenSource>,
    pub modals: Modals,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    CapabilityCheck,
    SelectMicrophone,
    SelectCamera,
    SelectRoom { prior_error: Option<AppError> },
    JoinRoom { token: String },
    /// Runtime unsupported; nothing else will run
    FatalError(AppError),
    /// Device selection failed; needs a manual restart
    RecoverableError(AppError),
}

impl FlowState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowState::FatalError(_) | FlowState::RecoverableError(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            FlowState::CapabilityCheck => "capability_check",
            FlowState::SelectMicrophone => "select_microphone",
            FlowState::SelectCamera => "select_camera",
            FlowState::SelectRoom { .. } => "select_room",
            FlowState::JoinRoom { .. } => "join_room",
            FlowState::FatalError(_) => "fatal_error",
            FlowState::RecoverableError(_) => "recoverable_error",
        }
    }
}

/// Drives device selection, room selection and room joins
pub struct Flow {
    browser: Browser,
    sdk: Arc<dyn VideoSdk>,
    store: Arc<dyn KeyValueStore>,
    tokens: Arc<dyn TokenSource>,
    mic_modal: Box<dyn DeviceModal>,
    camera_modal: Box<dyn DeviceModal>,
    room_modal: Box<dyn RoomModal>,
    error_modal: Box<dyn ErrorModal>,
    media: MediaSelector,
    rooms: RoomSelector,
    joiner: RoomJoiner,
    device_ids: DeviceIds,
    options: ConnectOptions,
    state: FlowState,
}

impl Flow {
    pub fn new(browser: Browser, params: UrlParams, collaborators: Collaborators) -> Self {
        let Collaborators {
            sdk,
            store,
            tokens,
            modals,
        } = collaborators;

        Self {
            options: ConnectOptions::defaults(browser.is_mobile()),
            media: MediaSelector::new(sdk.clone(), store.clone()),
            rooms: RoomSelector::new(store.clone(), params),
            joiner: RoomJoiner::new(sdk.clone()),
            browser,
            sdk,
            store,
            tokens,
            mic_modal: modals.mic,
            camera_modal: modals.camera,
            room_modal: modals.room,
            error_modal: modals.error,
            device_ids: DeviceIds::default(),
            state: FlowState::CapabilityCheck,
        }
    }

    /// Wire the flow to the durable file store and HTTP token endpoint
    /// named by `config`.
    pub fn from_config(config: &Config, sdk: Arc<dyn VideoSdk>, modals: Modals) -> Self {
        tracing::info!(
            token_url = %config.token_url,
            store = %config.device_store_path.display(),
            "Configuring join flow"
        );
        Self::new(
            Browser::new(config.user_agent.clone()),
            UrlParams::parse(&config.page_query),
            Collaborators {
                sdk,
                store: Arc::new(FileStore::new(&config.device_store_path)),
                tokens: Arc::new(HttpTokenClient::new(config.token_url.clone())),
                modals,
            },
        )
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn device_ids(&self) -> &DeviceIds {
        &self.device_ids
    }

    pub fn connect_options(&self) -> &ConnectOptions {
        &self.options
    }

    pub fn url_params(&self) -> &UrlParams {
        self.rooms.params()
    }

    /// Run until a terminal state is reached. Joining rooms loops back to
    /// room selection, so on a healthy runtime this only returns after a
    /// failure.
    pub async fn run(&mut self) -> &FlowState {
        while !self.state.is_terminal() {
            self.step().await;
        }
        &self.state
    }

    /// Perform exactly one transition. Terminal states stay put.
    pub async fn step(&mut self) -> &FlowState {
        let from = std::mem::replace(&mut self.state, FlowState::CapabilityCheck);
        let from_name = from.name();

        let next = match from {
            FlowState::CapabilityCheck => self.check_capability().await,
            FlowState::SelectMicrophone => {
                self.select_device(DeviceKind::Audio, FlowState::SelectCamera)
                    .await
            }
            FlowState::SelectCamera => {
                self.select_device(DeviceKind::Video, FlowState::SelectRoom { prior_error: None })
                    .await
            }
            FlowState::SelectRoom { prior_error } => self.select_room(prior_error).await,
            FlowState::JoinRoom { token } => self.join_room(token).await,
            terminal @ (FlowState::FatalError(_) | FlowState::RecoverableError(_)) => terminal,
        };

        tracing::debug!(from = from_name, to = next.name(), "Flow transition");
        self.state = next;
        &self.state
    }

    async fn check_capability(&mut self) -> FlowState {
        if !self.browser.is_supported(self.sdk.as_ref()) {
            let error = AppError::Unsupported;
            show_error(self.error_modal.as_mut(), &error);
            return FlowState::FatalError(error);
        }

        self.device_ids = self.load_device_ids().await;
        FlowState::SelectMicrophone
    }

    /// Stored ids are only honoured on desktop.
    async fn load_device_ids(&self) -> DeviceIds {
        if self.browser.is_mobile() {
            tracing::info!("Mobile runtime, ignoring stored device ids");
            return DeviceIds::default();
        }

        let mut ids = DeviceIds::default();
        for kind in [DeviceKind::Audio, DeviceKind::Video] {
            match self.store.device_id(kind).await {
                Ok(Some(id)) => ids.set(kind, id),
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, kind = ?kind, "Failed to read stored device id"),
            }
        }
        ids
    }

    async fn select_device(&mut self, kind: DeviceKind, next: FlowState) -> FlowState {
        if let Some(device_id) = self.device_ids.get(kind) {
            tracing::debug!(kind = ?kind, device_id, "Reusing stored device");
            return next;
        }

        let result = match kind {
            DeviceKind::Audio => {
                self.media
                    .select_media(kind, self.mic_modal.as_mut(), attach_level_meter)
                    .await
            }
            DeviceKind::Video => {
                self.media
                    .select_media(kind, self.camera_modal.as_mut(), attach_video_preview)
                    .await
            }
        };

        match result {
            Ok(device_id) => {
                self.device_ids.set(kind, device_id);
                next
            }
            Err(error) => {
                tracing::error!(kind = ?kind, error = %error, "Device selection failed");
                show_error(self.error_modal.as_mut(), &error);
                FlowState::RecoverableError(error)
            }
        }
    }

    async fn select_room(&mut self, prior_error: Option<AppError>) -> FlowState {
        let form = self
            .rooms
            .select_room(self.room_modal.as_mut(), prior_error.as_ref())
            .await;

        let Some(form) = form else {
            self.device_ids.clear();
            if let Err(e) = self.store.clear_device_ids().await {
                tracing::warn!(error = %e, "Failed to clear stored device ids");
            }
            return FlowState::SelectMicrophone;
        };

        match self.prepare_join(&form).await {
            Ok(token) => FlowState::JoinRoom { token },
            Err(error) => {
                tracing::warn!(identity = %form.identity, error = %error, "Could not prepare join");
                FlowState::SelectRoom {
                    prior_error: Some(error),
                }
            }
        }
    }

    async fn prepare_join(&mut self, form: &RoomFormData) -> Result<String> {
        self.options.assemble(&self.device_ids, form)?;
        let token = self.tokens.fetch_token(&form.identity).await?;
        Ok(token)
    }

    async fn join_room(&mut self, token: String) -> FlowState {
        match self.joiner.join_room(&token, &self.options).await {
            Ok(_) => FlowState::SelectRoom { prior_error: None },
            Err(error) => FlowState::SelectRoom {
                prior_error: Some(error),
            },
        }
    }
}
