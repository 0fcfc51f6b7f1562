//! Tracing Audio Output - 无声卡宿主使用的音频输出
//!
//! 只记录绑定的片段与播放时长，不向设备输出声音

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::application::ports::{AudioOutputPort, DecodedClip, PlaybackError};

/// 当前播放会话
#[derive(Debug, Clone, Copy)]
struct ActiveSession {
    started_at: Instant,
    duration: Duration,
}

/// 记录式音频输出
#[derive(Default)]
pub struct TracingAudioOutput {
    session: Mutex<Option<ActiveSession>>,
}

impl TracingAudioOutput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioOutputPort for TracingAudioOutput {
    fn play(&self, clip: DecodedClip) -> Result<(), PlaybackError> {
        let mut session = self
            .session
            .lock()
            .map_err(|_| PlaybackError::Output("Audio output lock poisoned".to_string()))?;

        if session.is_some() {
            tracing::debug!("Replacing clip bound to audio output");
        }
        *session = Some(ActiveSession {
            started_at: Instant::now(),
            duration: Duration::from_millis(clip.duration_ms),
        });

        tracing::info!(
            duration_ms = clip.duration_ms,
            sample_rate = clip.sample_rate,
            channels = clip.channels,
            samples = clip.samples.len(),
            "Audio output playing clip"
        );
        Ok(())
    }

    fn stop(&self) {
        if let Ok(mut session) = self.session.lock() {
            if session.take().is_some() {
                tracing::debug!("Audio output stopped");
            }
        }
    }

    fn is_playing(&self) -> bool {
        self.session
            .lock()
            .map(|session| {
                session
                    .as_ref()
                    .map(|s| s.started_at.elapsed() < s.duration)
                    .unwrap_or(false)
            })
            .unwrap_or(false)
    }
}
