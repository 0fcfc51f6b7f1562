//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现以及管线编排

pub mod adapters;
pub mod events;
pub mod pipeline;

pub use events::{EventPublisher, PipelineEvent};
pub use pipeline::{RunPolicy, SpeechPipeline, SpeechPipelineConfig};
