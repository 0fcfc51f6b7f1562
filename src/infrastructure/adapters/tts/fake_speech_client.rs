//! Fake Speech Client - 离线/测试用的 TTS 客户端
//!
//! 始终返回固定的音频数据，不实际调用 TTS 服务

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::application::ports::{SpeechEnginePort, SpeechError, SpeechRequest, SynthesizedAudio};

/// Fake Speech Client 配置
#[derive(Debug, Clone)]
pub struct FakeSpeechClientConfig {
    /// 固定返回的音频文件路径
    pub audio_file_path: PathBuf,
    /// 模拟的合成延迟（毫秒）
    pub latency_ms: u64,
}

/// Fake Speech Client
pub struct FakeSpeechClient {
    latency: Duration,
    audio_data: Vec<u8>,
    request_count: AtomicUsize,
}

impl FakeSpeechClient {
    /// 从音频文件创建
    pub fn new(config: FakeSpeechClientConfig) -> Result<Self, std::io::Error> {
        let audio_data = std::fs::read(&config.audio_file_path)?;
        tracing::info!(
            path = %config.audio_file_path.display(),
            size = audio_data.len(),
            "FakeSpeechClient initialized"
        );
        Ok(Self {
            latency: Duration::from_millis(config.latency_ms),
            audio_data,
            request_count: AtomicUsize::new(0),
        })
    }

    /// 直接使用内存中的音频数据
    pub fn from_bytes(audio_data: Vec<u8>) -> Self {
        Self {
            latency: Duration::ZERO,
            audio_data,
            request_count: AtomicUsize::new(0),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// 已收到的合成请求数
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechEnginePort for FakeSpeechClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SynthesizedAudio, SpeechError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            text_len = request.input.len(),
            voice = %request.voice,
            "FakeSpeechClient: returning fixed audio"
        );

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(SynthesizedAudio {
            audio_data: self.audio_data.clone(),
            format: request.response_format,
        })
    }
}
