//! Emotion Dispatcher - 情绪动作派发
//!
//! 播放开始时根据情绪代码调用角色动画（代码 8 额外打开流血特效）

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::ports::{AnimationControllerPort, EffectControllerPort};
use crate::domain::{EmotionAction, EmotionCode};

/// 流血特效的复位策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BloodResetPolicy {
    /// 不复位，由特效控制器或宿主自行处理
    #[default]
    Never,
    /// 下一次非流血动作派发前关闭
    OnNextUtterance,
    /// 派发 Idle 时关闭
    OnIdle,
}

/// 情绪派发器
pub struct EmotionDispatcher {
    animator: Arc<dyn AnimationControllerPort>,
    effects: Arc<dyn EffectControllerPort>,
    blood_reset: BloodResetPolicy,
}

impl EmotionDispatcher {
    pub fn new(
        animator: Arc<dyn AnimationControllerPort>,
        effects: Arc<dyn EffectControllerPort>,
    ) -> Self {
        Self {
            animator,
            effects,
            blood_reset: BloodResetPolicy::default(),
        }
    }

    pub fn with_blood_reset(mut self, policy: BloodResetPolicy) -> Self {
        self.blood_reset = policy;
        self
    }

    /// 派发情绪动作，返回实际执行的动作
    ///
    /// 每次调用恰好触发一个动画；没有情绪代码时回退到 Idle
    pub fn dispatch(&self, code: Option<EmotionCode>) -> EmotionAction {
        let action = match code {
            Some(code) => code.action(),
            None => {
                tracing::warn!("No emotion code found, falling back to idle");
                EmotionAction::Idle
            }
        };

        if self.should_reset_blood(action) && self.effects.blood_visible() {
            self.effects.set_blood_visibility(false);
            tracing::debug!(policy = ?self.blood_reset, "Blood effect reset");
        }

        if action.shows_blood() {
            self.effects.set_blood_visibility(true);
        }
        play(self.animator.as_ref(), action);

        tracing::debug!(
            code = ?code.map(|c| c.value()),
            action = %action,
            "Emotion dispatched"
        );

        action
    }

    fn should_reset_blood(&self, action: EmotionAction) -> bool {
        match self.blood_reset {
            BloodResetPolicy::Never => false,
            BloodResetPolicy::OnNextUtterance => !action.shows_blood(),
            BloodResetPolicy::OnIdle => action == EmotionAction::Idle,
        }
    }
}

fn play(animator: &dyn AnimationControllerPort, action: EmotionAction) {
    match action {
        EmotionAction::Idle => animator.play_idle(),
        EmotionAction::HeadPain => animator.play_head_pain(),
        EmotionAction::Happy => animator.play_happy(),
        EmotionAction::Shrug => animator.play_shrug(),
        EmotionAction::HeadNod => animator.play_head_nod(),
        EmotionAction::HeadShake => animator.play_head_shake(),
        EmotionAction::WrithingInPain => animator.play_writhing_in_pain(),
        EmotionAction::Sad => animator.play_sad(),
        EmotionAction::ArmStretch => animator.play_arm_stretch(),
        EmotionAction::NeckStretch => animator.play_neck_stretch(),
    }
}
