//! Boundary to the external video SDK.
//!
//! Connection, encoding and transport all live behind these traits; the flow
//! only sequences calls into them.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SdkError;
use crate::models::{ConnectOptions, DeviceKind, InputDevice, TrackConstraints};

/// Element a video track renders into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSurface {
    pub id: String,
}

impl RenderSurface {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Live local media track
pub trait LocalTrack: Send + Sync + fmt::Debug {
    fn kind(&self) -> DeviceKind;
    fn device_id(&self) -> &str;
    /// Render the track into `surface`
    fn attach(&self, surface: &RenderSurface) -> Result<(), SdkError>;
    /// Current input level in `0.0..=1.0`; `None` for video tracks
    fn audio_level(&self) -> Option<f32>;
    /// Release the underlying device
    fn stop(&self);
    fn is_stopped(&self) -> bool;
}

/// How a room session ended
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomEnd {
    /// Set when the SDK disconnected the participant because of a failure
    pub error: Option<SdkError>,
}

/// Connected room session
#[async_trait]
pub trait RoomSession: Send {
    fn sid(&self) -> &str;
    fn name(&self) -> &str;
    fn local_identity(&self) -> &str;
    /// Leave the room; `ended` resolves afterwards
    fn disconnect(&self);
    /// Resolves once the local participant is no longer in the room
    async fn ended(self: Box<Self>) -> RoomEnd;
}

#[async_trait]
pub trait VideoSdk: Send + Sync {
    /// Whether the runtime meets the SDK's requirements
    fn is_supported(&self) -> bool;
    fn version(&self) -> &str;
    async fn enumerate_devices(&self, kind: DeviceKind) -> Result<Vec<InputDevice>, SdkError>;
    async fn create_local_track(
        &self,
        kind: DeviceKind,
        constraints: &TrackConstraints,
    ) -> Result<Arc<dyn LocalTrack>, SdkError>;
    async fn connect(
        &self,
        token: &str,
        options: &ConnectOptions,
    ) -> Result<Box<dyn RoomSession>, SdkError>;
}
