//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 语速允许范围
const SPEED_RANGE: std::ops::RangeInclusive<f32> = 0.25..=4.0;

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `EMOTALK_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `EMOTALK_SPEECH__VOICE=alloy`
/// - `EMOTALK_SPEECH__ENDPOINT=http://localhost:8880/v1/audio/speech`
/// - `EMOTALK_CACHE__DIR=/tmp/emotalk`
/// - `EMOTALK_PIPELINE__RUN_POLICY=serialized`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    builder = builder
        .set_default("speech.endpoint", "https://api.openai.com/v1/audio/speech")?
        .set_default("speech.model", "tts-1")?
        .set_default("speech.voice", "nova")?
        .set_default("speech.response_format", "mp3")?
        .set_default("speech.speed", 1.0)?
        .set_default("speech.api_key_var", "OPENAI_API_KEY")?
        .set_default("cache.dir", "data/cache")?
        .set_default("cache.file_stem", "audio")?
        .set_default("pipeline.run_policy", "concurrent")?
        .set_default("pipeline.blood_reset", "never")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 例如: EMOTALK_SPEECH__VOICE=alloy
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("EMOTALK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let required = [
        ("speech.endpoint", &config.speech.endpoint),
        ("speech.model", &config.speech.model),
        ("speech.voice", &config.speech.voice),
        ("speech.api_key_var", &config.speech.api_key_var),
        ("cache.file_stem", &config.cache.file_stem),
    ];
    for (key, value) in required {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                key
            )));
        }
    }

    if !SPEED_RANGE.contains(&config.speech.speed) {
        return Err(ConfigError::ValidationError(format!(
            "Speech speed {} is outside {}..={}",
            config.speech.speed,
            SPEED_RANGE.start(),
            SPEED_RANGE.end()
        )));
    }

    // 播放端只能解码这些格式
    if !config.speech.response_format.is_decodable() {
        return Err(ConfigError::ValidationError(format!(
            "Response format '{}' cannot be played back",
            config.speech.response_format
        )));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    match &config.speech.fake_audio_path {
        Some(path) => tracing::info!("Speech: fake audio from {:?}", path),
        None => tracing::info!("Speech Endpoint: {}", config.speech.endpoint),
    }
    tracing::info!(
        "Model / Voice: {} / {}",
        config.speech.model,
        config.speech.voice
    );
    tracing::info!(
        "Format / Speed: {} / {}",
        config.speech.response_format,
        config.speech.speed
    );
    tracing::info!("API Key Variable: {}", config.speech.api_key_var);
    tracing::info!(
        "Audio Cache: {:?}",
        config.cache.slot_path(config.speech.response_format)
    );
    tracing::info!("Run Policy: {:?}", config.pipeline.run_policy);
    tracing::info!("Blood Reset: {:?}", config.pipeline.blood_reset);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::AudioFormat;
    use crate::application::BloodResetPolicy;
    use crate::infrastructure::pipeline::RunPolicy;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_empty_voice() {
        let mut config = AppConfig::default();
        config.speech.voice = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_blank_file_stem() {
        let mut config = AppConfig::default();
        config.cache.file_stem = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_speed_out_of_range() {
        let mut config = AppConfig::default();
        config.speech.speed = 5.0;
        assert!(validate_config(&config).is_err());

        config.speech.speed = 0.25;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_undecodable_format() {
        let mut config = AppConfig::default();
        config.speech.response_format = AudioFormat::Opus;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("opus"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("emotalk.toml");
        std::fs::write(
            &path,
            r#"
[speech]
voice = "alloy"
response_format = "wav"
speed = 1.5

[cache]
dir = "/tmp/emotalk"

[pipeline]
run_policy = "reject_when_busy"
blood_reset = "on_idle"
"#,
        )
        .unwrap();

        let config = load_config_from_path(Some(&path)).unwrap();
        assert_eq!(config.speech.voice, "alloy");
        assert_eq!(config.speech.model, "tts-1");
        assert_eq!(config.speech.response_format, AudioFormat::Wav);
        assert_eq!(config.speech.speed, 1.5);
        assert_eq!(config.cache.dir, PathBuf::from("/tmp/emotalk"));
        assert_eq!(config.cache.file_stem, "audio");
        assert_eq!(config.pipeline.run_policy, RunPolicy::RejectWhenBusy);
        assert_eq!(config.pipeline.blood_reset, BloodResetPolicy::OnIdle);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("emotalk.toml");
        std::fs::write(&path, "[speech]\nspeed = 10.0\n").unwrap();

        let err = load_config_from_path(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            load_config_from_path(Some(&path)),
            Err(ConfigError::LoadError(_))
        ));
    }
}
