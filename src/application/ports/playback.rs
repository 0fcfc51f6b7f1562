//! Playback Port - 加载并播放缓存的音频
//!
//! - PlaybackPort: 读取、解码、绑定到输出并开始播放
//! - AudioOutputPort: 宿主提供的底层音频输出

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use super::CacheError;

/// 播放错误
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Audio artifact unreadable: {0}")]
    Unreadable(#[from] CacheError),

    #[error("Decoding error: {0}")]
    Decode(String),

    #[error("Audio output error: {0}")]
    Output(String),
}

/// 解码后的音频片段（交错 f32 PCM）
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedClip {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u8,
    pub duration_ms: u64,
}

/// 播放已开始
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackStarted {
    pub duration_ms: u64,
    pub sample_rate: u32,
    pub channels: u8,
}

impl From<&DecodedClip> for PlaybackStarted {
    fn from(clip: &DecodedClip) -> Self {
        Self {
            duration_ms: clip.duration_ms,
            sample_rate: clip.sample_rate,
            channels: clip.channels,
        }
    }
}

/// Playback Port
#[async_trait]
pub trait PlaybackPort: Send + Sync {
    /// 加载音频并开始播放
    ///
    /// 返回时音频已解码完毕且正在播放；失败时不会开始播放
    async fn load_and_play(&self, path: &Path) -> Result<PlaybackStarted, PlaybackError>;
}

/// Audio Output Port
///
/// 角色唯一的音频输出，同一时刻只绑定一个片段
pub trait AudioOutputPort: Send + Sync {
    /// 绑定片段并开始播放，替换当前内容
    fn play(&self, clip: DecodedClip) -> Result<(), PlaybackError>;

    /// 停止当前播放
    fn stop(&self);

    fn is_playing(&self) -> bool;
}
