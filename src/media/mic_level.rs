//! Microphone level meter driven from a live audio track.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::sdk::LocalTrack;

/// How often the track level is sampled
pub const LEVEL_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Map a raw `0.0..=1.0` input level onto `0..=max_level` on a log2 scale,
/// so quiet speech still moves the bar.
pub fn scale_level(raw: f32, max_level: u32) -> u32 {
    let raw = if raw.is_finite() { raw.clamp(0.0, 1.0) } else { 0.0 };
    let log = (1.0 + raw * 255.0).log2() / 8.0;
    ((log * max_level as f32).ceil() as u32).min(max_level)
}

/// Sample `track` until it stops, calling `on_level` whenever the scaled
/// level changes.
pub fn spawn_level_meter<F>(track: Arc<dyn LocalTrack>, max_level: u32, mut on_level: F) -> JoinHandle<()>
where
    F: FnMut(u32) + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(LEVEL_POLL_INTERVAL);
        let mut last = None;

        loop {
            ticker.tick().await;
            if track.is_stopped() {
                break;
            }
            let Some(raw) = track.audio_level() else {
                break;
            };

            let level = scale_level(raw, max_level);
            if last != Some(level) {
                last = Some(level);
                on_level(level);
            }
        }

        tracing::trace!(device_id = %track.device_id(), "Level meter stopped");
    })
}
