//! File Audio Cache - 文件系统单槽位音频缓存
//!
//! 实现 AudioCachePort trait

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{AudioCachePort, AudioFormat, CacheError};

/// 文件系统音频缓存
///
/// 只有一个槽位：`<dir>/<file_stem>.<ext>`，每次写入都覆盖
pub struct FileAudioCache {
    slot_path: PathBuf,
}

impl FileAudioCache {
    pub fn new(dir: impl AsRef<Path>, file_stem: &str, format: AudioFormat) -> Self {
        let slot_path = dir
            .as_ref()
            .join(format!("{}.{}", file_stem, format.extension()));
        Self { slot_path }
    }
}

#[async_trait]
impl AudioCachePort for FileAudioCache {
    fn slot_path(&self) -> PathBuf {
        self.slot_path.clone()
    }

    async fn write(&self, audio_data: &[u8]) -> Result<PathBuf, CacheError> {
        if let Some(dir) = self.slot_path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| CacheError::io(dir, e))?;
        }

        fs::write(&self.slot_path, audio_data)
            .await
            .map_err(|e| CacheError::io(&self.slot_path, e))?;

        tracing::debug!(
            path = %self.slot_path.display(),
            size = audio_data.len(),
            "Saved audio artifact"
        );

        Ok(self.slot_path.clone())
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>, CacheError> {
        match fs::read(path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(CacheError::NotFound(path.to_path_buf()))
            }
            Err(e) => Err(CacheError::io(path, e)),
        }
    }

    async fn delete(&self, path: &Path) -> Result<(), CacheError> {
        match fs::remove_file(path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Deleted audio artifact");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::io(path, e)),
        }
    }
}
