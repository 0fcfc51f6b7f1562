//! 应用层错误定义
//!
//! 一次管线运行中所有失败的统一分类

use std::path::PathBuf;
use thiserror::Error;

use crate::application::ports::{CacheError, PlaybackError, SpeechError};
use crate::domain::StateTransitionError;

/// 管线错误
#[derive(Debug, Error)]
pub enum PipelineError {
    /// 输入为空，未发起网络请求
    #[error("No text provided for TTS")]
    EmptyInput,

    /// 已有运行在进行中（仅 reject_when_busy 策略）
    #[error("Another utterance is still in progress")]
    Busy,

    /// 网络层失败，没有拿到响应
    #[error("Network error: {0}")]
    Network(String),

    /// TTS 服务返回非 2xx
    #[error("TTS API error {status} {reason}: {body}")]
    Api {
        status: u16,
        reason: String,
        body: String,
    },

    /// 缓存文件读写失败
    #[error("File IO error on {}: {reason}", path.display())]
    FileIo { path: PathBuf, reason: String },

    /// 解码或绑定输出失败
    #[error("Playback error: {0}")]
    Playback(String),

    /// 状态机被违反
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl PipelineError {
    /// 错误分类名（用于日志和事件）
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::Busy => "busy",
            Self::Network(_) => "network_failure",
            Self::Api { .. } => "api_failure",
            Self::FileIo { .. } => "file_io_failure",
            Self::Playback(_) => "playback_failure",
            Self::InvalidState(_) => "invalid_state",
        }
    }
}

impl From<SpeechError> for PipelineError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::Network(cause) => Self::Network(cause),
            SpeechError::Api {
                status,
                reason,
                body,
            } => Self::Api {
                status,
                reason,
                body,
            },
        }
    }
}

impl From<CacheError> for PipelineError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::NotFound(path) => Self::FileIo {
                path,
                reason: "file not found".to_string(),
            },
            CacheError::Io { path, reason } => Self::FileIo { path, reason },
        }
    }
}

impl From<PlaybackError> for PipelineError {
    fn from(err: PlaybackError) -> Self {
        match err {
            PlaybackError::Unreadable(cache_err) => cache_err.into(),
            other => Self::Playback(other.to_string()),
        }
    }
}

impl From<StateTransitionError> for PipelineError {
    fn from(err: StateTransitionError) -> Self {
        Self::InvalidState(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_keeps_body() {
        let err: PipelineError = SpeechError::Api {
            status: 401,
            reason: "Unauthorized".to_string(),
            body: "{\"error\":\"bad key\"}".to_string(),
        }
        .into();
        assert_eq!(err.kind(), "api_failure");
        assert!(err.to_string().contains("bad key"));
    }

    #[test]
    fn test_unreadable_artifact_is_file_io() {
        let err: PipelineError =
            PlaybackError::Unreadable(CacheError::NotFound(PathBuf::from("/tmp/audio.mp3"))).into();
        match err {
            PipelineError::FileIo { path, .. } => assert_eq!(path, PathBuf::from("/tmp/audio.mp3")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_error_is_playback() {
        let err: PipelineError = PlaybackError::Decode("Probe failed".to_string()).into();
        assert_eq!(err.kind(), "playback_failure");
    }
}
