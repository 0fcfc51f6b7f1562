//! Emotalk - 带情绪动作的角色语音管线
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Emotion Context: 情绪标签解析、情绪码到动作的映射
//! - Pipeline State: 单次运行的状态机
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SpeechEngine, AudioCache, Playback, 动画/特效/凭据）
//! - Dispatcher: 情绪动作派发
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: HTTP/Fake 语音合成、文件缓存、Symphonia 解码播放、角色控制器
//! - Pipeline: SpeechPipeline 编排
//! - Events: 管线事件广播

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod test_support;

pub use config::{load_config, AppConfig};
pub use infrastructure::pipeline::{RunPolicy, RunReport, SpeechPipeline, SpeechPipelineConfig};
