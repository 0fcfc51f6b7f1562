//! Tracing Character Controllers - 无界面宿主使用的角色协作者
//!
//! 动画与特效调用只写入日志

use std::sync::atomic::{AtomicBool, Ordering};

use crate::application::ports::{AnimationControllerPort, EffectControllerPort};

/// 记录式动画控制器
pub struct TracingAnimationController {
    character: String,
}

impl TracingAnimationController {
    pub fn new(character: impl Into<String>) -> Self {
        Self {
            character: character.into(),
        }
    }

    fn play(&self, animation: &str) {
        tracing::info!(character = %self.character, animation, "Playing animation");
    }
}

impl AnimationControllerPort for TracingAnimationController {
    fn play_idle(&self) {
        self.play("idle");
    }

    fn play_head_pain(&self) {
        self.play("head_pain");
    }

    fn play_happy(&self) {
        self.play("happy");
    }

    fn play_shrug(&self) {
        self.play("shrug");
    }

    fn play_head_nod(&self) {
        self.play("head_nod");
    }

    fn play_head_shake(&self) {
        self.play("head_shake");
    }

    fn play_writhing_in_pain(&self) {
        self.play("writhing_in_pain");
    }

    fn play_sad(&self) {
        self.play("sad");
    }

    fn play_arm_stretch(&self) {
        self.play("arm_stretch");
    }

    fn play_neck_stretch(&self) {
        self.play("neck_stretch");
    }
}

/// 记录式特效控制器，持有流血可见性
#[derive(Default)]
pub struct TracingEffectController {
    blood_visible: AtomicBool,
}

impl TracingEffectController {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EffectControllerPort for TracingEffectController {
    fn set_blood_visibility(&self, visible: bool) {
        let previous = self.blood_visible.swap(visible, Ordering::SeqCst);
        if previous != visible {
            tracing::info!(visible, "Blood effect visibility changed");
        }
    }

    fn blood_visible(&self) -> bool {
        self.blood_visible.load(Ordering::SeqCst)
    }
}
