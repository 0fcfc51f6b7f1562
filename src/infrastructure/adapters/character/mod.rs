//! Character Adapter - 角色动画与特效

mod tracing_controllers;

pub use tracing_controllers::{TracingAnimationController, TracingEffectController};
