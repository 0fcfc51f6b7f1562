//! 测试用的协作者替身

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

use crate::application::ports::{
    AnimationControllerPort, AudioCachePort, AudioOutputPort, CacheError, CredentialSourcePort,
    DecodedClip, EffectControllerPort, PlaybackError, PlaybackStarted,
};
use crate::domain::EmotionAction;

/// 1 秒、16kHz、单声道、16 位静音 WAV
pub fn create_test_wav() -> Vec<u8> {
    let sample_rate: u32 = 16000;
    let num_channels: u16 = 1;
    let bits_per_sample: u16 = 16;
    let num_samples = sample_rate as usize;

    let data_size = num_samples * (bits_per_sample as usize / 8) * num_channels as usize;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size);

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(file_size as u32).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&num_channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    let byte_rate = sample_rate * num_channels as u32 * (bits_per_sample / 8) as u32;
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    let block_align = num_channels * (bits_per_sample / 8);
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&(data_size as u32).to_le_bytes());
    for _ in 0..num_samples {
        wav.extend_from_slice(&0i16.to_le_bytes());
    }

    wav
}

/// 启动本地 TTS 服务，返回合成接口 URL
pub async fn spawn_speech_server(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1/audio/speech", addr)
}

#[derive(Default)]
pub struct StaticCredentials {
    variables: HashMap<String, String>,
}

impl StaticCredentials {
    pub fn with(name: &str, value: &str) -> Self {
        let mut variables = HashMap::new();
        variables.insert(name.to_string(), value.to_string());
        Self { variables }
    }
}

impl CredentialSourcePort for StaticCredentials {
    fn get_variable(&self, name: &str) -> Option<String> {
        self.variables.get(name).cloned()
    }
}

#[derive(Default)]
pub struct RecordingAnimator {
    calls: Mutex<Vec<EmotionAction>>,
}

impl RecordingAnimator {
    pub fn calls(&self) -> Vec<EmotionAction> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, action: EmotionAction) {
        self.calls.lock().unwrap().push(action);
    }
}

impl AnimationControllerPort for RecordingAnimator {
    fn play_idle(&self) {
        self.record(EmotionAction::Idle);
    }

    fn play_head_pain(&self) {
        self.record(EmotionAction::HeadPain);
    }

    fn play_happy(&self) {
        self.record(EmotionAction::Happy);
    }

    fn play_shrug(&self) {
        self.record(EmotionAction::Shrug);
    }

    fn play_head_nod(&self) {
        self.record(EmotionAction::HeadNod);
    }

    fn play_head_shake(&self) {
        self.record(EmotionAction::HeadShake);
    }

    fn play_writhing_in_pain(&self) {
        self.record(EmotionAction::WrithingInPain);
    }

    fn play_sad(&self) {
        self.record(EmotionAction::Sad);
    }

    fn play_arm_stretch(&self) {
        self.record(EmotionAction::ArmStretch);
    }

    fn play_neck_stretch(&self) {
        self.record(EmotionAction::NeckStretch);
    }
}

#[derive(Default)]
pub struct RecordingEffects {
    calls: Mutex<Vec<bool>>,
    visible: AtomicBool,
}

impl RecordingEffects {
    pub fn calls(&self) -> Vec<bool> {
        self.calls.lock().unwrap().clone()
    }
}

impl EffectControllerPort for RecordingEffects {
    fn set_blood_visibility(&self, visible: bool) {
        self.calls.lock().unwrap().push(visible);
        self.visible.store(visible, Ordering::SeqCst);
    }

    fn blood_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct RecordingAudioOutput {
    played: Mutex<Vec<PlaybackStarted>>,
    playing: AtomicBool,
    stops: AtomicUsize,
    fail: bool,
}

impl RecordingAudioOutput {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn played(&self) -> Vec<PlaybackStarted> {
        self.played.lock().unwrap().clone()
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl AudioOutputPort for RecordingAudioOutput {
    fn play(&self, clip: DecodedClip) -> Result<(), PlaybackError> {
        if self.fail {
            return Err(PlaybackError::Output("device unavailable".to_string()));
        }
        self.played.lock().unwrap().push(PlaybackStarted::from(&clip));
        self.playing.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.playing.store(false, Ordering::SeqCst);
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }
}

/// 统计读写删次数的缓存包装
pub struct CountingCache {
    inner: Arc<dyn AudioCachePort>,
    writes: AtomicUsize,
    deletes: AtomicUsize,
    deleted_paths: Mutex<Vec<PathBuf>>,
    fail_delete: bool,
}

impl CountingCache {
    pub fn new(inner: Arc<dyn AudioCachePort>) -> Self {
        Self {
            inner,
            writes: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            deleted_paths: Mutex::new(Vec::new()),
            fail_delete: false,
        }
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn deleted_paths(&self) -> Vec<PathBuf> {
        self.deleted_paths.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioCachePort for CountingCache {
    fn slot_path(&self) -> PathBuf {
        self.inner.slot_path()
    }

    async fn write(&self, audio_data: &[u8]) -> Result<PathBuf, CacheError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.write(audio_data).await
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>, CacheError> {
        self.inner.read(path).await
    }

    async fn delete(&self, path: &Path) -> Result<(), CacheError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.deleted_paths.lock().unwrap().push(path.to_path_buf());
        if self.fail_delete {
            return Err(CacheError::io(path, "permission denied"));
        }
        self.inner.delete(path).await
    }
}

/// 一条捕获到的日志事件
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub message: String,
    pub fields: HashMap<String, String>,
}

/// 记录所有 tracing 事件的 Layer
#[derive(Clone, Default)]
pub struct CapturedEvents {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CapturedEvents {
    /// 在当前线程安装捕获 subscriber，guard 释放前有效
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let captured = Self::default();
        let subscriber = tracing_subscriber::registry().with(captured.clone());
        (captured, tracing::subscriber::set_default(subscriber))
    }

    pub fn at(&self, level: Level) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    pub fn with_message(&self, message: &str) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.message == message)
            .cloned()
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for CapturedEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldRecorder::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.fields.remove("message").unwrap_or_default(),
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldRecorder {
    fields: HashMap<String, String>,
}

impl Visit for FieldRecorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), format!("{:?}", value));
    }
}
