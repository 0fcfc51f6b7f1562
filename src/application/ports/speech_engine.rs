//! Speech Engine Port - 语音合成引擎抽象
//!
//! 定义 TTS 合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use super::AudioFormat;

/// 语音合成错误
#[derive(Debug, Error)]
pub enum SpeechError {
    /// 没有拿到任何响应（连接失败、读取响应体失败等）
    #[error("Network error: {0}")]
    Network(String),

    /// 服务返回非 2xx，body 原样保留用于诊断
    #[error("TTS API error {status} {reason}: {body}")]
    Api {
        status: u16,
        reason: String,
        body: String,
    },
}

/// 语音合成请求
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    /// 模型名称，如 `tts-1`
    pub model: String,
    /// 要合成的文本（已去掉情绪标签）
    pub input: String,
    /// 音色，如 `nova`
    pub voice: String,
    /// 返回的音频格式
    pub response_format: AudioFormat,
    /// 语速
    pub speed: f32,
}

/// 合成得到的音频
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    /// 服务返回的原始字节，未做任何处理
    pub audio_data: Vec<u8>,
    pub format: AudioFormat,
}

/// Speech Engine Port
///
/// 远程 TTS 服务的抽象接口。不做重试
#[async_trait]
pub trait SpeechEnginePort: Send + Sync {
    /// 合成一段文本
    async fn synthesize(&self, request: SpeechRequest) -> Result<SynthesizedAudio, SpeechError>;
}
