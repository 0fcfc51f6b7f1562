//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_cache;
mod audio_format;
mod collaborators;
mod playback;
mod speech_engine;

pub use audio_cache::{AudioCachePort, CacheError};
pub use audio_format::{AudioFormat, UnsupportedFormat};
pub use collaborators::{AnimationControllerPort, CredentialSourcePort, EffectControllerPort};
pub use playback::{AudioOutputPort, DecodedClip, PlaybackError, PlaybackPort, PlaybackStarted};
pub use speech_engine::{SpeechEnginePort, SpeechError, SpeechRequest, SynthesizedAudio};
