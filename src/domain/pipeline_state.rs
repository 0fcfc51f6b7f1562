//! 语音管线状态机
//!
//! Idle → Parsing → Synthesizing → Caching → Loading → Playing → Idle
//! Synthesizing / Caching / Loading 失败时进入 Error，随后回到 Idle

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 管线状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Parsing,
    Synthesizing,
    Caching,
    Loading,
    Playing,
    Error,
}

/// 非法状态转换
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Invalid pipeline transition: {from} -> {to}")]
pub struct StateTransitionError {
    pub from: PipelineState,
    pub to: PipelineState,
}

impl PipelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Parsing => "parsing",
            Self::Synthesizing => "synthesizing",
            Self::Caching => "caching",
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Error => "error",
        }
    }

    /// 检查是否允许转换到 `next`
    pub fn can_transition_to(self, next: PipelineState) -> bool {
        use PipelineState::*;

        matches!(
            (self, next),
            (Idle, Parsing)
                // 去掉标签后文本为空，直接短路
                | (Parsing, Idle)
                | (Parsing, Synthesizing)
                | (Synthesizing, Caching)
                | (Synthesizing, Error)
                | (Caching, Loading)
                | (Caching, Error)
                | (Loading, Playing)
                | (Loading, Error)
                | (Playing, Idle)
                | (Error, Idle)
        )
    }

    /// 执行状态转换
    pub fn transition(self, next: PipelineState) -> Result<PipelineState, StateTransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(StateTransitionError {
                from: self,
                to: next,
            })
        }
    }

    /// 是否可以进入 Error
    pub fn can_fail(self) -> bool {
        self.can_transition_to(Self::Error)
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PipelineState::*;

    #[test]
    fn test_happy_path() {
        let mut state = Idle;
        for next in [Parsing, Synthesizing, Caching, Loading, Playing, Idle] {
            state = state.transition(next).unwrap();
        }
        assert_eq!(state, Idle);
    }

    #[test]
    fn test_error_sink_sources() {
        assert!(Synthesizing.can_fail());
        assert!(Caching.can_fail());
        assert!(Loading.can_fail());
        assert!(!Idle.can_fail());
        assert!(!Parsing.can_fail());
        assert!(!Playing.can_fail());
        assert_eq!(Error.transition(Idle), Ok(Idle));
    }

    #[test]
    fn test_playing_requires_loading() {
        assert_eq!(
            Caching.transition(Playing),
            Err(StateTransitionError {
                from: Caching,
                to: Playing
            })
        );
        assert!(!Synthesizing.can_transition_to(Playing));
    }

    #[test]
    fn test_no_skipping_stages() {
        assert!(!Idle.can_transition_to(Synthesizing));
        assert!(!Parsing.can_transition_to(Caching));
        assert!(!Error.can_transition_to(Parsing));
    }
}
