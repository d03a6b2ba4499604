pub mod mic_level;
pub mod selector;

pub use mic_level::{scale_level, spawn_level_meter, LEVEL_POLL_INTERVAL};
pub use selector::{attach_level_meter, attach_video_preview, MediaSelector};
