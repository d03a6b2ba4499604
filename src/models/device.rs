use serde::{Deserialize, Serialize};

use crate::models::connect::{DeviceIdConstraint, VideoCapture};

/// Kind of local input device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Audio,
    Video,
}

impl DeviceKind {
    /// Durable storage key holding the selected device id
    pub fn storage_key(self) -> &'static str {
        match self {
            DeviceKind::Audio => "audioDeviceId",
            DeviceKind::Video => "videoDeviceId",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeviceKind::Audio => "microphone",
            DeviceKind::Video => "camera",
        }
    }
}

/// Input device as enumerated by the SDK
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDevice {
    pub device_id: String,
    pub label: String,
    pub kind: DeviceKind,
}

impl InputDevice {
    pub fn new(kind: DeviceKind, device_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            label: label.into(),
            kind,
        }
    }
}

/// Device ids chosen for the current flow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceIds {
    pub audio: Option<String>,
    pub video: Option<String>,
}

impl DeviceIds {
    pub fn get(&self, kind: DeviceKind) -> Option<&str> {
        match kind {
            DeviceKind::Audio => self.audio.as_deref(),
            DeviceKind::Video => self.video.as_deref(),
        }
    }

    pub fn set(&mut self, kind: DeviceKind, device_id: String) {
        match kind {
            DeviceKind::Audio => self.audio = Some(device_id),
            DeviceKind::Video => self.video = Some(device_id),
        }
    }

    pub fn clear(&mut self) {
        self.audio = None;
        self.video = None;
    }
}

/// Constraints passed to the SDK when creating a local track
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackConstraints {
    pub device_id: DeviceIdConstraint,
    #[serde(flatten)]
    pub capture: Option<VideoCapture>,
}

impl TrackConstraints {
    pub fn for_device(kind: DeviceKind, device_id: &str) -> Self {
        Self {
            device_id: DeviceIdConstraint::exact(device_id),
            capture: match kind {
                DeviceKind::Audio => None,
                DeviceKind::Video => Some(VideoCapture::default()),
            },
        }
    }
}
