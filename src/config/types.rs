//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::application::ports::AudioFormat;
use crate::application::BloodResetPolicy;
use crate::infrastructure::pipeline::{RunPolicy, SpeechPipelineConfig};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 语音合成配置
    #[serde(default)]
    pub speech: SpeechConfig,

    /// 音频缓存配置
    #[serde(default)]
    pub cache: CacheConfig,

    /// 管线行为配置
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// 组装管线配置
    pub fn pipeline_config(&self) -> SpeechPipelineConfig {
        SpeechPipelineConfig {
            model: self.speech.model.clone(),
            voice: self.speech.voice.clone(),
            response_format: self.speech.response_format,
            speed: self.speech.speed,
            run_policy: self.pipeline.run_policy,
        }
    }
}

/// 语音合成配置
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// 合成接口地址
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// 模型名
    #[serde(default = "default_model")]
    pub model: String,

    /// 音色
    #[serde(default = "default_voice")]
    pub voice: String,

    /// 返回的音频格式
    #[serde(default)]
    pub response_format: AudioFormat,

    /// 语速，0.25 - 4.0
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// 保存 API Key 的环境变量名
    #[serde(default = "default_api_key_var")]
    pub api_key_var: String,

    /// 设置后使用本地音频文件代替远程合成（离线调试）
    #[serde(default)]
    pub fake_audio_path: Option<PathBuf>,
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/audio/speech".to_string()
}

fn default_model() -> String {
    "tts-1".to_string()
}

fn default_voice() -> String {
    "nova".to_string()
}

fn default_speed() -> f32 {
    1.0
}

fn default_api_key_var() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            voice: default_voice(),
            response_format: AudioFormat::default(),
            speed: default_speed(),
            api_key_var: default_api_key_var(),
            fake_audio_path: None,
        }
    }
}

/// 音频缓存配置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// 缓存目录
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,

    /// 缓存文件名（不含扩展名）
    #[serde(default = "default_file_stem")]
    pub file_stem: String,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("data/cache")
}

fn default_file_stem() -> String {
    "audio".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
            file_stem: default_file_stem(),
        }
    }
}

impl CacheConfig {
    /// 缓存文件完整路径
    pub fn slot_path(&self, format: AudioFormat) -> PathBuf {
        self.dir
            .join(format!("{}.{}", self.file_stem, format.extension()))
    }
}

/// 管线行为配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineConfig {
    /// 重叠运行的处理策略
    #[serde(default)]
    pub run_policy: RunPolicy,

    /// 血迹效果的复位策略
    #[serde(default)]
    pub blood_reset: BloodResetPolicy,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
