//! Speech Pipeline - 角色语音管线
//!
//! 每次运行：解析情绪标签 → 合成 → 写入缓存 → 加载播放 → 派发情绪动作 → 删除缓存
//!
//! 缓存槽位与音频输出在所有运行之间共享。默认不加锁，重叠的运行会互相覆盖，
//! 需要串行时通过 `RunPolicy` 开启。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::application::ports::{
    AudioCachePort, AudioFormat, PlaybackPort, PlaybackStarted, SpeechEnginePort, SpeechRequest,
};
use crate::application::{EmotionDispatcher, PipelineError};
use crate::domain::{parse_emotion_tag, EmotionAction, EmotionCode, ParsedMessage, PipelineState};
use crate::infrastructure::events::{EventPublisher, PipelineEvent};

/// 重叠运行的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPolicy {
    /// 不做任何保护，重叠运行竞争缓存槽位和音频输出
    #[default]
    Concurrent,
    /// 排队，等待上一次运行回到 Idle
    Serialized,
    /// 上一次运行未结束时直接拒绝
    RejectWhenBusy,
}

/// 管线配置
#[derive(Debug, Clone)]
pub struct SpeechPipelineConfig {
    pub model: String,
    pub voice: String,
    pub response_format: AudioFormat,
    pub speed: f32,
    pub run_policy: RunPolicy,
}

impl Default for SpeechPipelineConfig {
    fn default() -> Self {
        Self {
            model: "tts-1".to_string(),
            voice: "nova".to_string(),
            response_format: AudioFormat::Mp3,
            speed: 1.0,
            run_policy: RunPolicy::default(),
        }
    }
}

/// 一次成功运行的结果
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub run_id: Uuid,
    pub spoken_text: String,
    pub code: Option<EmotionCode>,
    pub action: EmotionAction,
    pub playback: PlaybackStarted,
}

/// 语音管线
///
/// 每个角色持有一个实例
pub struct SpeechPipeline {
    config: SpeechPipelineConfig,
    speech_engine: Arc<dyn SpeechEnginePort>,
    audio_cache: Arc<dyn AudioCachePort>,
    playback: Arc<dyn PlaybackPort>,
    dispatcher: EmotionDispatcher,
    event_publisher: EventPublisher,
    run_gate: Mutex<()>,
}

impl SpeechPipeline {
    pub fn new(
        config: SpeechPipelineConfig,
        speech_engine: Arc<dyn SpeechEnginePort>,
        audio_cache: Arc<dyn AudioCachePort>,
        playback: Arc<dyn PlaybackPort>,
        dispatcher: EmotionDispatcher,
    ) -> Self {
        Self {
            config,
            speech_engine,
            audio_cache,
            playback,
            dispatcher,
            event_publisher: EventPublisher::new(),
            run_gate: Mutex::new(()),
        }
    }

    /// 订阅管线事件
    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.event_publisher.subscribe()
    }

    /// 后台运行，不等待结果
    ///
    /// 所有失败都已在运行内部记录日志，调用方可以直接丢弃返回的 handle
    pub fn convert_text_to_speech(
        self: &Arc<Self>,
        text: Option<String>,
    ) -> JoinHandle<Result<RunReport, PipelineError>> {
        let pipeline = Arc::clone(self);
        tokio::spawn(async move { pipeline.speak(text.as_deref()).await })
    }

    /// 执行一次完整运行并返回结果
    ///
    /// 任何失败都会先记录日志、删除缓存并回到 Idle，然后再返回给调用方
    pub async fn speak(&self, text: Option<&str>) -> Result<RunReport, PipelineError> {
        let Some(message) = text.filter(|t| !t.trim().is_empty()) else {
            tracing::info!("No text provided for TTS");
            return Err(PipelineError::EmptyInput);
        };

        let _gate = self.acquire_gate().await?;
        let mut run = RunTracker::new(&self.event_publisher);

        run.enter(PipelineState::Parsing)?;
        let parsed = parse_emotion_tag(message);
        if parsed.spoken_text.is_empty() {
            run.enter(PipelineState::Idle)?;
            tracing::info!(run_id = %run.run_id, "Message has no text besides the emotion tag");
            self.event_publisher
                .publish_run_finished(run.run_id, Some(PipelineError::EmptyInput.to_string()));
            return Err(PipelineError::EmptyInput);
        }

        tracing::debug!(
            run_id = %run.run_id,
            code = ?parsed.code.map(|c| c.value()),
            text_len = parsed.spoken_text.len(),
            "Emotion tag parsed"
        );

        let mut artifact = None;
        let outcome = self.run_stages(&mut run, &parsed, &mut artifact).await;
        if let Err(err) = &outcome {
            log_failure(run.run_id, err);
            run.fail();
        }

        if let Some(path) = artifact {
            self.cleanup(run.run_id, &path).await;
        }
        run.finish();

        self.event_publisher.publish_run_finished(
            run.run_id,
            outcome.as_ref().err().map(|e| e.to_string()),
        );

        let (playback, action) = outcome?;
        Ok(RunReport {
            run_id: run.run_id,
            spoken_text: parsed.spoken_text,
            code: parsed.code,
            action,
            playback,
        })
    }

    async fn acquire_gate(&self) -> Result<Option<MutexGuard<'_, ()>>, PipelineError> {
        match self.config.run_policy {
            RunPolicy::Concurrent => Ok(None),
            RunPolicy::Serialized => Ok(Some(self.run_gate.lock().await)),
            RunPolicy::RejectWhenBusy => match self.run_gate.try_lock() {
                Ok(guard) => Ok(Some(guard)),
                Err(_) => {
                    tracing::warn!("Utterance rejected, previous run still in progress");
                    Err(PipelineError::Busy)
                }
            },
        }
    }

    /// Synthesizing → Caching → Loading → Playing
    ///
    /// `artifact` 记录需要清理的缓存路径，进入 Caching 后即被设置
    async fn run_stages(
        &self,
        run: &mut RunTracker<'_>,
        parsed: &ParsedMessage,
        artifact: &mut Option<PathBuf>,
    ) -> Result<(PlaybackStarted, EmotionAction), PipelineError> {
        run.enter(PipelineState::Synthesizing)?;
        let audio = self
            .speech_engine
            .synthesize(self.build_request(&parsed.spoken_text))
            .await?;

        run.enter(PipelineState::Caching)?;
        // 写入失败时可能留下半个文件
        *artifact = Some(self.audio_cache.slot_path());
        let path = self.audio_cache.write(&audio.audio_data).await?;
        *artifact = Some(path.clone());

        run.enter(PipelineState::Loading)?;
        let started = self.playback.load_and_play(&path).await?;

        run.enter(PipelineState::Playing)?;
        let action = self.dispatcher.dispatch(parsed.code);
        self.event_publisher.publish_dispatched(run.run_id, action);

        tracing::info!(
            run_id = %run.run_id,
            action = %action,
            duration_ms = started.duration_ms,
            "Utterance playing"
        );

        Ok((started, action))
    }

    fn build_request(&self, spoken_text: &str) -> SpeechRequest {
        SpeechRequest {
            model: self.config.model.clone(),
            input: spoken_text.to_string(),
            voice: self.config.voice.clone(),
            response_format: self.config.response_format,
            speed: self.config.speed,
        }
    }

    /// 删除缓存；失败只记录，不上抛
    async fn cleanup(&self, run_id: Uuid, path: &Path) {
        if let Err(e) = self.audio_cache.delete(path).await {
            tracing::warn!(
                run_id = %run_id,
                path = %path.display(),
                error = %e,
                "Failed to delete audio artifact"
            );
        }
    }
}

fn log_failure(run_id: Uuid, err: &PipelineError) {
    match err {
        PipelineError::Api {
            status,
            reason,
            body,
        } => tracing::error!(
            run_id = %run_id,
            status = *status,
            reason = %reason,
            body = %body,
            "Error with TTS API"
        ),
        PipelineError::Network(cause) => {
            tracing::error!(run_id = %run_id, cause = %cause, "TTS request failed")
        }
        PipelineError::FileIo { path, reason } => tracing::error!(
            run_id = %run_id,
            path = %path.display(),
            reason = %reason,
            "Audio file IO failed"
        ),
        PipelineError::Playback(reason) => {
            tracing::error!(run_id = %run_id, reason = %reason, "Audio file loading error")
        }
        other => tracing::error!(run_id = %run_id, error = %other, "Speech pipeline failed"),
    }
}

/// 单次运行的状态跟踪
struct RunTracker<'a> {
    run_id: Uuid,
    state: PipelineState,
    events: &'a EventPublisher,
}

impl<'a> RunTracker<'a> {
    fn new(events: &'a EventPublisher) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            state: PipelineState::Idle,
            events,
        }
    }

    fn enter(&mut self, next: PipelineState) -> Result<(), PipelineError> {
        let from = self.state;
        self.state = from.transition(next)?;
        tracing::trace!(run_id = %self.run_id, from = %from, to = %next, "Pipeline state changed");
        self.events.publish_state_changed(self.run_id, from, next);
        Ok(())
    }

    fn fail(&mut self) {
        if self.state.can_fail() {
            let _ = self.enter(PipelineState::Error);
        }
    }

    /// 回到 Idle
    fn finish(&mut self) {
        if self.state == PipelineState::Idle {
            return;
        }
        if let Err(e) = self.enter(PipelineState::Idle) {
            tracing::warn!(run_id = %self.run_id, error = %e, "Forcing pipeline back to idle");
            let from = self.state;
            self.state = PipelineState::Idle;
            self.events
                .publish_state_changed(self.run_id, from, PipelineState::Idle);
        }
    }
}
