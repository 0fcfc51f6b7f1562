//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechEngine、AudioCache、Playback、角色协作者）
//! - dispatcher: 情绪动作派发
//! - error: 管线错误定义

pub mod dispatcher;
pub mod error;
pub mod ports;

pub use dispatcher::{BloodResetPolicy, EmotionDispatcher};
pub use error::PipelineError;

pub use ports::{
    // Collaborators
    AnimationControllerPort,
    CredentialSourcePort,
    EffectControllerPort,
    // Audio cache
    AudioCachePort,
    CacheError,
    // Playback
    AudioOutputPort,
    DecodedClip,
    PlaybackError,
    PlaybackPort,
    PlaybackStarted,
    // Speech engine
    AudioFormat,
    SpeechEnginePort,
    SpeechError,
    SpeechRequest,
    SynthesizedAudio,
};
