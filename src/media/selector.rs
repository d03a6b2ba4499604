use std::sync::Arc;

use crate::error::{AppError, MediaAccessError, Result};
use crate::media::mic_level::spawn_level_meter;
use crate::models::{DeviceKind, InputDevice, TrackConstraints};
use crate::sdk::{LocalTrack, VideoSdk};
use crate::storage::KeyValueStore;
use crate::ui::{DeviceAction, DeviceModal};

/// Preview track, stopped when dropped
struct Preview(Arc<dyn LocalTrack>);

impl Drop for Preview {
    fn drop(&mut self) {
        if !self.0.is_stopped() {
            self.0.stop();
        }
    }
}

/// Lets the user pick a microphone or camera while previewing it
pub struct MediaSelector {
    sdk: Arc<dyn VideoSdk>,
    store: Arc<dyn KeyValueStore>,
}

impl MediaSelector {
    pub fn new(sdk: Arc<dyn VideoSdk>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { sdk, store }
    }

    /// Open `modal` for `kind`, preview each device the user looks at through
    /// `on_track`, and return the confirmed device id.
    ///
    /// The id is persisted under the kind's storage key. Preview tracks are
    /// released and the modal hidden however the selection ends.
    pub async fn select_media<F>(
        &self,
        kind: DeviceKind,
        modal: &mut dyn DeviceModal,
        mut on_track: F,
    ) -> Result<String>
    where
        F: FnMut(&Arc<dyn LocalTrack>, &dyn DeviceModal) -> Result<()> + Send,
    {
        let devices: Vec<InputDevice> = self
            .sdk
            .enumerate_devices(kind)
            .await
            .map_err(|e| MediaAccessError::from_sdk(kind, e))?
            .into_iter()
            .filter(|d| d.kind == kind)
            .collect();

        let Some(first) = devices.first() else {
            return Err(MediaAccessError::no_device(kind).into());
        };
        let mut selected = first.device_id.clone();

        modal.show(kind, &devices, &selected);
        let result = self
            .preview_until_applied(kind, modal, &devices, &mut selected, &mut on_track)
            .await;
        modal.hide();

        let device_id = result?;
        if let Err(e) = self.store.set_device_id(kind, &device_id).await {
            tracing::warn!(error = %e, kind = ?kind, "Failed to persist device selection");
        }
        tracing::info!(kind = ?kind, device_id = %device_id, "Device selected");

        Ok(device_id)
    }

    async fn preview_until_applied<F>(
        &self,
        kind: DeviceKind,
        modal: &mut dyn DeviceModal,
        devices: &[InputDevice],
        selected: &mut String,
        on_track: &mut F,
    ) -> Result<String>
    where
        F: FnMut(&Arc<dyn LocalTrack>, &dyn DeviceModal) -> Result<()> + Send,
    {
        loop {
            let constraints = TrackConstraints::for_device(kind, selected);
            let track = self
                .sdk
                .create_local_track(kind, &constraints)
                .await
                .map_err(|e| MediaAccessError::from_sdk(kind, e))?;
            let preview = Preview(track);
            on_track(&preview.0, &*modal)?;

            match modal.next_action().await {
                DeviceAction::Apply => return Ok(selected.clone()),
                DeviceAction::Switch(device_id) => {
                    if devices.iter().any(|d| d.device_id == device_id) {
                        tracing::debug!(kind = ?kind, device_id = %device_id, "Switching preview device");
                        *selected = device_id;
                    } else {
                        tracing::warn!(kind = ?kind, device_id = %device_id, "Ignoring unknown device");
                    }
                }
            }
        }
    }
}

/// Render a camera preview into the modal's video element
pub fn attach_video_preview(track: &Arc<dyn LocalTrack>, modal: &dyn DeviceModal) -> Result<()> {
    track
        .attach(&modal.preview_surface())
        .map_err(|e| AppError::from(MediaAccessError::from_sdk(track.kind(), e)))
}

/// Drive the modal's level indicator from a microphone track. The meter stops
/// with the track.
pub fn attach_level_meter(track: &Arc<dyn LocalTrack>, modal: &dyn DeviceModal) -> Result<()> {
    let indicator = modal.level_indicator();
    let max_level = indicator.max_level();
    spawn_level_meter(track.clone(), max_level, move |level| {
        indicator.render_level(level)
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;
    use crate::storage::MemoryStore;
    use crate::testing::{MockSdk, ScriptedDeviceModal};
    use pretty_assertions::assert_eq;

    fn selector(sdk: Arc<MockSdk>) -> (MediaSelector, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (MediaSelector::new(sdk, store.clone()), store)
    }

    #[tokio::test]
    async fn test_apply_persists_first_device() {
        let sdk = Arc::new(MockSdk::with_devices());
        let (selector, store) = selector(sdk.clone());
        let mut modal = ScriptedDeviceModal::new(vec![DeviceAction::Apply]);

        let device_id = selector
            .select_media(DeviceKind::Video, &mut modal, attach_video_preview)
            .await
            .expect("Should select");

        assert_eq!(device_id, "cam-1");
        assert_eq!(
            store.device_id(DeviceKind::Video).await.unwrap().as_deref(),
            Some("cam-1")
        );

        let tracks = sdk.tracks();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].attached.lock().unwrap().len(), 1);
        assert!(tracks[0].is_stopped());
        assert_eq!(modal.log.lock().unwrap().hidden, 1);
    }

    #[tokio::test]
    async fn test_switch_releases_previous_preview() {
        let sdk = Arc::new(MockSdk::with_devices());
        let (selector, _store) = selector(sdk.clone());
        let mut modal = ScriptedDeviceModal::new(vec![
            DeviceAction::Switch("mic-2".to_string()),
            DeviceAction::Switch("mic-404".to_string()),
            DeviceAction::Apply,
        ]);

        let device_id = selector
            .select_media(DeviceKind::Audio, &mut modal, attach_level_meter)
            .await
            .expect("Should select");

        assert_eq!(device_id, "mic-2");
        let tracks = sdk.tracks();
        let ids: Vec<&str> = tracks.iter().map(|t| t.device_id()).collect();
        assert_eq!(ids, vec!["mic-1", "mic-2", "mic-2"]);
        assert!(tracks.iter().all(|t| t.is_stopped()));
    }

    #[tokio::test]
    async fn test_no_devices_is_media_access_error() {
        let sdk = Arc::new(MockSdk::default());
        let (selector, store) = selector(sdk);
        let mut modal = ScriptedDeviceModal::new(vec![]);

        let result = selector
            .select_media(DeviceKind::Audio, &mut modal, attach_level_meter)
            .await;

        assert!(matches!(result, Err(AppError::MediaAccess(_))));
        assert!(modal.log.lock().unwrap().shown.is_empty());
        assert_eq!(store.device_id(DeviceKind::Audio).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_denied_track_hides_modal() {
        let sdk = Arc::new(MockSdk::with_devices());
        sdk.fail_tracks(
            DeviceKind::Video,
            SdkError::new("NotAllowedError", "Permission denied"),
        );
        let (selector, store) = selector(sdk);
        let mut modal = ScriptedDeviceModal::new(vec![]);

        let err = selector
            .select_media(DeviceKind::Video, &mut modal, attach_video_preview)
            .await
            .expect_err("Should fail");

        assert_eq!(err.name(), "NotAllowedError");
        assert_eq!(modal.log.lock().unwrap().hidden, 1);
        assert_eq!(store.device_id(DeviceKind::Video).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failing_preview_callback_releases_track() {
        let sdk = Arc::new(MockSdk::with_devices());
        let (selector, _store) = selector(sdk.clone());
        let mut modal = ScriptedDeviceModal::new(vec![]);

        let result = selector
            .select_media(DeviceKind::Video, &mut modal, |_track, _modal| {
                Err(AppError::InternalError("render failed".to_string()))
            })
            .await;

        assert!(result.is_err());
        assert!(sdk.tracks()[0].is_stopped());
    }
}
