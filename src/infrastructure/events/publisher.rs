//! Event Publisher Implementation
//!
//! 管线状态变化的广播通道

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::domain::{EmotionAction, PipelineState};

/// 管线事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum PipelineEvent {
    /// 状态转换
    StateChanged {
        run_id: Uuid,
        from: PipelineState,
        to: PipelineState,
    },
    /// 情绪动作已派发
    EmotionDispatched { run_id: Uuid, action: EmotionAction },
    /// 运行结束（已回到 Idle）
    RunFinished {
        run_id: Uuid,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl PipelineEvent {
    pub fn run_id(&self) -> Uuid {
        match self {
            Self::StateChanged { run_id, .. }
            | Self::EmotionDispatched { run_id, .. }
            | Self::RunFinished { run_id, .. } => *run_id,
        }
    }
}

/// 事件发布器
pub struct EventPublisher {
    channel: broadcast::Sender<PipelineEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(100);
        Self { channel: tx }
    }

    /// 订阅管线事件
    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.channel.subscribe()
    }

    pub fn publish_state_changed(&self, run_id: Uuid, from: PipelineState, to: PipelineState) {
        self.publish(PipelineEvent::StateChanged { run_id, from, to });
    }

    pub fn publish_dispatched(&self, run_id: Uuid, action: EmotionAction) {
        self.publish(PipelineEvent::EmotionDispatched { run_id, action });
    }

    pub fn publish_run_finished(&self, run_id: Uuid, error: Option<String>) {
        self.publish(PipelineEvent::RunFinished { run_id, error });
    }

    fn publish(&self, event: PipelineEvent) {
        // 没有订阅者时发送失败，忽略
        let _ = self.channel.send(event);
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
