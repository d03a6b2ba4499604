//! Typed connection options handed to the video SDK when joining a room.
//!
//! Field names serialize in the SDK's camelCase shape.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::device::DeviceIds;
use crate::models::room::RoomFormData;

/// Incoming video bitrate cap applied on mobile runtimes (2.5 Mbps)
pub const MOBILE_MAX_SUBSCRIPTION_BITRATE: u64 = 2_500_000;

/// `{ exact: "<device id>" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdConstraint {
    pub exact: String,
}

impl DeviceIdConstraint {
    pub fn exact(device_id: impl Into<String>) -> Self {
        Self {
            exact: device_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderDimensions {
    pub high: VideoDimensions,
    pub standard: VideoDimensions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackPriority {
    Low,
    Standard,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BandwidthProfileMode {
    Grid,
    Collaboration,
    Presentation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoBandwidthProfile {
    pub dominant_speaker_priority: TrackPriority,
    pub mode: BandwidthProfileMode,
    pub render_dimensions: RenderDimensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_subscription_bitrate: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandwidthProfile {
    pub video: VideoBandwidthProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoCodec {
    #[serde(rename = "VP8")]
    Vp8,
    H264,
    #[serde(rename = "VP9")]
    Vp9,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCodecPreference {
    pub codec: VideoCodec,
    pub simulcast: bool,
}

/// Local video capture parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCapture {
    pub width: u32,
    pub height: u32,
    pub frame_rate: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<DeviceIdConstraint>,
}

impl Default for VideoCapture {
    /// 720p @ 24 fps
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            frame_rate: 24,
            device_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioCapture {
    pub device_id: DeviceIdConstraint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectOptions {
    pub bandwidth_profile: BandwidthProfile,
    pub dominant_speaker: bool,
    pub max_audio_bitrate: u32,
    pub preferred_video_codecs: Vec<VideoCodecPreference>,
    pub video: VideoCapture,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioCapture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ConnectOptions {
    /// Defaults for a group video room; mobile runtimes get a capped
    /// incoming video bitrate.
    pub fn defaults(mobile: bool) -> Self {
        Self {
            bandwidth_profile: BandwidthProfile {
                video: VideoBandwidthProfile {
                    dominant_speaker_priority: TrackPriority::High,
                    mode: BandwidthProfileMode::Collaboration,
                    render_dimensions: RenderDimensions {
                        high: VideoDimensions {
                            width: 1280,
                            height: 720,
                        },
                        standard: VideoDimensions {
                            width: 160,
                            height: 90,
                        },
                    },
                    max_subscription_bitrate: mobile.then_some(MOBILE_MAX_SUBSCRIPTION_BITRATE),
                },
            },
            dominant_speaker: true,
            max_audio_bitrate: 16000,
            preferred_video_codecs: vec![VideoCodecPreference {
                codec: VideoCodec::Vp8,
                simulcast: true,
            }],
            video: VideoCapture::default(),
            audio: None,
            name: None,
        }
    }

    /// Fill in the device constraints and room name for a join attempt.
    ///
    /// Fails when the room name is empty or a device has not been selected.
    pub fn assemble(&mut self, devices: &DeviceIds, form: &RoomFormData) -> Result<()> {
        let room_name = form.room_name.trim();
        if room_name.is_empty() {
            return Err(AppError::InvalidRoomForm("Room name is required".to_string()));
        }
        let (Some(audio), Some(video)) = (devices.audio.as_deref(), devices.video.as_deref())
        else {
            return Err(AppError::InvalidRoomForm(
                "Microphone and camera must be selected before joining".to_string(),
            ));
        };

        self.audio = Some(AudioCapture {
            device_id: DeviceIdConstraint::exact(audio),
        });
        self.video.device_id = Some(DeviceIdConstraint::exact(video));
        self.name = Some(room_name.to_string());
        Ok(())
    }
}
