//! Storage Adapter - 临时音频文件

mod file_audio_cache;

pub use file_audio_cache::FileAudioCache;
