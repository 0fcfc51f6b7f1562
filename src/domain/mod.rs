//! Domain Layer - 领域层
//!
//! - Emotion Context: 情绪标签解析与动作映射
//! - Pipeline State: 语音管线状态机

pub mod emotion;

mod pipeline_state;

pub use emotion::{parse_emotion_tag, EmotionAction, EmotionCode, EmotionError, ParsedMessage};
pub use pipeline_state::{PipelineState, StateTransitionError};
