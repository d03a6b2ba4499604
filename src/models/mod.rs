pub mod connect;
pub mod device;
pub mod room;
pub mod token;

pub use connect::{
    AudioCapture, BandwidthProfile, BandwidthProfileMode, ConnectOptions, DeviceIdConstraint,
    RenderDimensions, TrackPriority, VideoBandwidthProfile, VideoCapture, VideoCodec,
    VideoCodecPreference, VideoDimensions, MOBILE_MAX_SUBSCRIPTION_BITRATE,
};
pub use device::{DeviceIds, DeviceKind, InputDevice, TrackConstraints};
pub use room::{RoomFormData, RoomPrefill};
pub use token::{Claims, TokenQuery};
