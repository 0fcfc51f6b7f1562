//! Emotion Context - 情绪上下文
//!
//! 职责:
//! - 对话行末尾情绪标签 `[d]` 的解析
//! - 情绪代码 → 角色反应动作映射

mod errors;
mod tag_parser;
mod value_objects;

pub use errors::EmotionError;
pub use tag_parser::{parse_emotion_tag, ParsedMessage};
pub use value_objects::{EmotionAction, EmotionCode};
