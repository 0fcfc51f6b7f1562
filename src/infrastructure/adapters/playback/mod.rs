//! Playback Adapter - 解码与音频输出

mod symphonia_coordinator;
mod tracing_output;

pub use symphonia_coordinator::{decode_clip, SymphoniaPlaybackCoordinator};
pub use tracing_output::TracingAudioOutput;
