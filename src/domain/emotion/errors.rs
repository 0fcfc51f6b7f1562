//! Emotion Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmotionError {
    #[error("无效的情绪代码: {0}")]
    InvalidCode(u8),
}
