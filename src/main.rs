//! Emotalk - 角色语音管线
//!
//! 从标准输入逐行读取台词（可带 `[d]` 情绪标签），合成语音、播放并派发情绪动作

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use emotalk::application::ports::SpeechEnginePort;
use emotalk::application::EmotionDispatcher;
use emotalk::config::{load_config, print_config, AppConfig};
use emotalk::infrastructure::adapters::{
    EnvCredentialSource, FakeSpeechClient, FakeSpeechClientConfig, FileAudioCache,
    HttpSpeechClient, HttpSpeechClientConfig, SymphoniaPlaybackCoordinator,
    TracingAnimationController, TracingAudioOutput, TracingEffectController,
};
use emotalk::infrastructure::pipeline::SpeechPipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Emotalk - character speech pipeline");
    print_config(&config);

    let speech_engine = build_speech_engine(&config)?;

    let audio_cache = Arc::new(FileAudioCache::new(
        &config.cache.dir,
        &config.cache.file_stem,
        config.speech.response_format,
    ));
    let playback = Arc::new(SymphoniaPlaybackCoordinator::new(
        audio_cache.clone(),
        Arc::new(TracingAudioOutput::new()),
    ));
    let dispatcher = EmotionDispatcher::new(
        Arc::new(TracingAnimationController::new("agent")),
        Arc::new(TracingEffectController::new()),
    )
    .with_blood_reset(config.pipeline.blood_reset);

    let pipeline = SpeechPipeline::new(
        config.pipeline_config(),
        speech_engine,
        audio_cache,
        playback,
        dispatcher,
    );

    tracing::info!("Reading dialogue lines from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        // 失败已在管线内记录
        if let Ok(report) = pipeline.speak(Some(&line)).await {
            tracing::debug!(
                run_id = %report.run_id,
                action = %report.action,
                "Run completed"
            );
        }
    }

    tracing::info!("Input closed, shutting down");

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!("{},emotalk={}", config.log.level, config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_speech_engine(config: &AppConfig) -> anyhow::Result<Arc<dyn SpeechEnginePort>> {
    if let Some(path) = &config.speech.fake_audio_path {
        let fake = FakeSpeechClient::new(FakeSpeechClientConfig {
            audio_file_path: path.clone(),
            latency_ms: 0,
        })?;
        return Ok(Arc::new(fake));
    }

    let client_config = HttpSpeechClientConfig::new(&config.speech.endpoint)
        .with_api_key_var(&config.speech.api_key_var);
    let client = HttpSpeechClient::new(client_config, &EnvCredentialSource)?;
    Ok(Arc::new(client))
}
