//! Scripted collaborators for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{AppError, JoinError, SdkError};
use crate::models::{ConnectOptions, DeviceKind, InputDevice, RoomPrefill, TrackConstraints};
use crate::sdk::{LocalTrack, RenderSurface, RoomEnd, RoomSession, VideoSdk};
use crate::token::TokenSource;
use crate::ui::{DeviceAction, DeviceModal, ErrorModal, ErrorView, LevelIndicator, RoomAction, RoomModal};

#[derive(Debug)]
pub struct MockTrack {
    kind: DeviceKind,
    device_id: String,
    level_bits: AtomicU32,
    stopped: AtomicBool,
    pub attached: Mutex<Vec<RenderSurface>>,
}

impl MockTrack {
    pub fn new(kind: DeviceKind, device_id: &str) -> Self {
        Self {
            kind,
            device_id: device_id.to_string(),
            level_bits: AtomicU32::new(0f32.to_bits()),
            stopped: AtomicBool::new(false),
            attached: Mutex::new(Vec::new()),
        }
    }

    pub fn set_level(&self, level: f32) {
        self.level_bits.store(level.to_bits(), Ordering::SeqCst);
    }
}

impl LocalTrack for MockTrack {
    fn kind(&self) -> DeviceKind {
        self.kind
    }

    fn device_id(&self) -> &str {
        &self.device_id
    }

    fn attach(&self, surface: &RenderSurface) -> Result<(), SdkError> {
        self.attached.lock().unwrap().push(surface.clone());
        Ok(())
    }

    fn audio_level(&self) -> Option<f32> {
        match self.kind {
            DeviceKind::Audio => Some(f32::from_bits(self.level_bits.load(Ordering::SeqCst))),
            DeviceKind::Video => None,
        }
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

pub struct MockRoomSession {
    sid: String,
    name: String,
    identity: String,
    end: RoomEnd,
}

#[async_trait]
impl RoomSession for MockRoomSession {
    fn sid(&self) -> &str {
        &self.sid
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn local_identity(&self) -> &str {
        &self.identity
    }

    fn disconnect(&self) {}

    async fn ended(self: Box<Self>) -> RoomEnd {
        self.end
    }
}

#[derive(Default)]
pub struct MockSdk {
    pub unsupported: bool,
    pub devices: HashMap<DeviceKind, Vec<InputDevice>>,
    pub track_errors: Mutex<HashMap<DeviceKind, SdkError>>,
    pub tracks: Mutex<Vec<Arc<MockTrack>>>,
    /// Outcome of each `connect` call, in order; defaults to a clean leave
    pub sessions: Mutex<VecDeque<Result<RoomEnd, SdkError>>>,
    pub connects: Mutex<Vec<(String, ConnectOptions)>>,
}

impl MockSdk {
    pub fn with_devices() -> Self {
        let mut devices = HashMap::new();
        devices.insert(
            DeviceKind::Audio,
            vec![
                InputDevice::new(DeviceKind::Audio, "mic-1", "Built-in Microphone"),
                InputDevice::new(DeviceKind::Audio, "mic-2", "USB Headset"),
            ],
        );
        devices.insert(
            DeviceKind::Video,
            vec![
                InputDevice::new(DeviceKind::Video, "cam-1", "FaceTime HD Camera"),
                InputDevice::new(DeviceKind::Video, "cam-2", "External Webcam"),
            ],
        );
        Self {
            devices,
            ..Default::default()
        }
    }

    pub fn fail_tracks(&self, kind: DeviceKind, err: SdkError) {
        self.track_errors.lock().unwrap().insert(kind, err);
    }

    pub fn push_session(&self, outcome: Result<RoomEnd, SdkError>) {
        self.sessions.lock().unwrap().push_back(outcome);
    }

    pub fn tracks(&self) -> Vec<Arc<MockTrack>> {
        self.tracks.lock().unwrap().clone()
    }

    pub fn connects(&self) -> Vec<(String, ConnectOptions)> {
        self.connects.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoSdk for MockSdk {
    fn is_supported(&self) -> bool {
        !self.unsupported
    }

    fn version(&self) -> &str {
        "mock-1.0"
    }

    async fn enumerate_devices(&self, kind: DeviceKind) -> Result<Vec<InputDevice>, SdkError> {
        Ok(self.devices.get(&kind).cloned().unwrap_or_default())
    }

    async fn create_local_track(
        &self,
        kind: DeviceKind,
        constraints: &TrackConstraints,
    ) -> Result<Arc<dyn LocalTrack>, SdkError> {
        if let Some(err) = self.track_errors.lock().unwrap().get(&kind) {
            return Err(err.clone());
        }
        let track = Arc::new(MockTrack::new(kind, &constraints.device_id.exact));
        self.tracks.lock().unwrap().push(track.clone());
        Ok(track)
    }

    async fn connect(
        &self,
        token: &str,
        options: &ConnectOptions,
    ) -> Result<Box<dyn RoomSession>, SdkError> {
        self.connects
            .lock()
            .unwrap()
            .push((token.to_string(), options.clone()));
        let outcome = self
            .sessions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RoomEnd::default()));
        let end = outcome?;
        Ok(Box::new(MockRoomSession {
            sid: "RM0001".to_string(),
            name: options.name.clone().unwrap_or_default(),
            identity: "local".to_string(),
            end,
        }))
    }
}

#[derive(Default)]
pub struct RecordingIndicator {
    pub levels: Mutex<Vec<u32>>,
}

impl LevelIndicator for RecordingIndicator {
    fn max_level(&self) -> u32 {
        40
    }

    fn render_level(&self, level: u32) {
        self.levels.lock().unwrap().push(level);
    }
}

#[derive(Debug, Default)]
pub struct DeviceModalLog {
    pub shown: Vec<(DeviceKind, String)>,
    pub hidden: usize,
}

/// Device modal replaying a fixed list of actions, then confirming
pub struct ScriptedDeviceModal {
    actions: VecDeque<DeviceAction>,
    pub log: Arc<Mutex<DeviceModalLog>>,
    pub indicator: Arc<RecordingIndicator>,
}

impl ScriptedDeviceModal {
    pub fn new(actions: Vec<DeviceAction>) -> Self {
        Self {
            actions: actions.into(),
            log: Arc::default(),
            indicator: Arc::default(),
        }
    }
}

#[async_trait]
impl DeviceModal for ScriptedDeviceModal {
    fn show(&mut self, kind: DeviceKind, _devices: &[InputDevice], selected: &str) {
        self.log
            .lock()
            .unwrap()
            .shown
            .push((kind, selected.to_string()));
    }

    async fn next_action(&mut self) -> DeviceAction {
        self.actions.pop_front().unwrap_or(DeviceAction::Apply)
    }

    fn hide(&mut self) {
        self.log.lock().unwrap().hidden += 1;
    }

    fn preview_surface(&self) -> RenderSurface {
        RenderSurface::new("camera-preview")
    }

    fn level_indicator(&self) -> Arc<dyn LevelIndicator> {
        self.indicator.clone()
    }
}

#[derive(Debug, Default)]
pub struct RoomModalLog {
    pub shown: Vec<(RoomPrefill, Option<AppError>)>,
    pub hidden: usize,
}

/// Room modal replaying a fixed list of actions
pub struct ScriptedRoomModal {
    actions: VecDeque<RoomAction>,
    pub log: Arc<Mutex<RoomModalLog>>,
}

impl ScriptedRoomModal {
    pub fn new(actions: Vec<RoomAction>) -> Self {
        Self {
            actions: actions.into(),
            log: Arc::default(),
        }
    }
}

#[async_trait]
impl RoomModal for ScriptedRoomModal {
    fn show(&mut self, prefill: &RoomPrefill, error: Option<&AppError>) {
        self.log
            .lock()
            .unwrap()
            .shown
            .push((prefill.clone(), error.cloned()));
    }

    async fn next_action(&mut self) -> RoomAction {
        self.actions
            .pop_front()
            .expect("room modal ran out of scripted actions")
    }

    fn hide(&mut self) {
        self.log.lock().unwrap().hidden += 1;
    }
}

#[derive(Clone, Default)]
pub struct RecordingErrorModal {
    pub shown: Arc<Mutex<Vec<ErrorView>>>,
}

impl ErrorModal for RecordingErrorModal {
    fn show(&mut self, view: ErrorView) {
        self.shown.lock().unwrap().push(view);
    }
}

/// Token source replaying fixed responses; defaults to `"tok123"`
#[derive(Default)]
pub struct MockTokens {
    responses: Mutex<VecDeque<Result<String, JoinError>>>,
    pub identities: Mutex<Vec<String>>,
}

impl MockTokens {
    pub fn push(&self, response: Result<String, JoinError>) {
        self.responses.lock().unwrap().push_back(response);
    }
}

#[async_trait]
impl TokenSource for MockTokens {
    async fn fetch_token(&self, identity: &str) -> Result<String, JoinError> {
        self.identities.lock().unwrap().push(identity.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("tok123".to_string()))
    }
}
