//! Speech Pipeline
//!
//! 文本 → 语音 → 播放 → 情绪动作 的编排

mod speech_pipeline;

pub use speech_pipeline::{RunPolicy, RunReport, SpeechPipeline, SpeechPipelineConfig};
