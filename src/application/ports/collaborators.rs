//! Collaborator Ports - 角色侧协作者
//!
//! 动画、特效与凭据由宿主实现

/// 角色动画控制器
pub trait AnimationControllerPort: Send + Sync {
    fn play_idle(&self);
    fn play_head_pain(&self);
    fn play_happy(&self);
    fn play_shrug(&self);
    fn play_head_nod(&self);
    fn play_head_shake(&self);
    fn play_writhing_in_pain(&self);
    fn play_sad(&self);
    fn play_arm_stretch(&self);
    fn play_neck_stretch(&self);
}

/// 特效控制器
///
/// 流血可见性是持久状态，由特效控制器持有
pub trait EffectControllerPort: Send + Sync {
    fn set_blood_visibility(&self, visible: bool);

    fn blood_visible(&self) -> bool;
}

/// 凭据来源（环境变量、密钥存储等）
pub trait CredentialSourcePort: Send + Sync {
    fn get_variable(&self, name: &str) -> Option<String>;
}
