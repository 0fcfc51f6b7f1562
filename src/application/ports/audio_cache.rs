//! Audio Cache Port - 临时音频槽位
//!
//! 合成结果先落地到一个固定路径，播放尝试结束后删除

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Audio Cache 错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache artifact not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error on {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },
}

impl CacheError {
    pub fn io(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// 出错的文件路径
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path) => path,
            Self::Io { path, .. } => path,
        }
    }
}

/// Audio Cache Port
///
/// 单槽位缓存：写入总是覆盖同一个路径，并发写入会互相覆盖
#[async_trait]
pub trait AudioCachePort: Send + Sync {
    /// 固定的槽位路径
    fn slot_path(&self) -> PathBuf;

    /// 写入音频，返回槽位路径
    async fn write(&self, audio_data: &[u8]) -> Result<PathBuf, CacheError>;

    /// 读取音频
    async fn read(&self, path: &Path) -> Result<Vec<u8>, CacheError>;

    /// 删除音频；文件不存在视为成功
    async fn delete(&self, path: &Path) -> Result<(), CacheError>;
}
