//! Modal dialogs the flow drives. Rendering is up to the host; only the data
//! each modal accepts and returns is fixed here.

pub mod error;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{DeviceKind, InputDevice, RoomFormData, RoomPrefill};
use crate::sdk::RenderSurface;

pub use error::{show_error, user_friendly_message, ErrorView};

/// User action inside a device selection modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceAction {
    /// Another device was picked from the list
    Switch(String),
    /// The current device was confirmed
    Apply,
}

/// Microphone level bar
pub trait LevelIndicator: Send + Sync {
    fn max_level(&self) -> u32;
    fn render_level(&self, level: u32);
}

#[async_trait]
pub trait DeviceModal: Send {
    fn show(&mut self, kind: DeviceKind, devices: &[InputDevice], selected: &str);
    async fn next_action(&mut self) -> DeviceAction;
    fn hide(&mut self);
    /// Video preview element
    fn preview_surface(&self) -> RenderSurface;
    fn level_indicator(&self) -> Arc<dyn LevelIndicator>;
}

/// User action inside the room selection modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomAction {
    Join(RoomFormData),
    /// Go back and pick the microphone and camera again
    ChangeDevices,
}

#[async_trait]
pub trait RoomModal: Send {
    /// Open the form; `error` is rendered above it when present
    fn show(&mut self, prefill: &RoomPrefill, error: Option<&AppError>);
    async fn next_action(&mut self) -> RoomAction;
    fn hide(&mut self);
}

pub trait ErrorModal: Send {
    fn show(&mut self, view: ErrorView);
}
