//! Symphonia Playback Coordinator - 基于 symphonia 的加载与播放
//!
//! 读取缓存槽位 → 在阻塞线程上解码为 PCM → 绑定到角色的音频输出

use async_trait::async_trait;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{
    AudioCachePort, AudioOutputPort, DecodedClip, PlaybackError, PlaybackPort, PlaybackStarted,
};

/// 播放协调器
pub struct SymphoniaPlaybackCoordinator {
    audio_cache: Arc<dyn AudioCachePort>,
    output: Arc<dyn AudioOutputPort>,
}

impl SymphoniaPlaybackCoordinator {
    pub fn new(audio_cache: Arc<dyn AudioCachePort>, output: Arc<dyn AudioOutputPort>) -> Self {
        Self {
            audio_cache,
            output,
        }
    }
}

#[async_trait]
impl PlaybackPort for SymphoniaPlaybackCoordinator {
    async fn load_and_play(&self, path: &Path) -> Result<PlaybackStarted, PlaybackError> {
        let data = self.audio_cache.read(path).await?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_owned);

        let clip = tokio::task::spawn_blocking(move || decode_clip(data, extension.as_deref()))
            .await
            .map_err(|e| PlaybackError::Decode(format!("Decode task failed: {}", e)))??;

        let started = PlaybackStarted::from(&clip);
        // 单一输出，新片段替换正在播放的片段
        if self.output.is_playing() {
            tracing::debug!("Interrupting previous clip");
            self.output.stop();
        }
        self.output.play(clip)?;

        tracing::info!(
            path = %path.display(),
            duration_ms = started.duration_ms,
            sample_rate = started.sample_rate,
            channels = started.channels,
            "Audio clip loaded, playback started"
        );

        Ok(started)
    }
}

/// 使用 symphonia 将音频解码为交错 f32 PCM
pub fn decode_clip(data: Vec<u8>, extension: Option<&str>) -> Result<DecodedClip, PlaybackError> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(data)), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| PlaybackError::Decode(format!("Probe failed: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| PlaybackError::Decode("No audio track found".to_string()))?;

    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| PlaybackError::Decode("Unknown sample rate".to_string()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| PlaybackError::Decode(format!("Decoder creation failed: {}", e)))?;

    let track_id = track.id;
    let mut channels = track.codec_params.channels.map(|c| c.count() as u8);
    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(PlaybackError::Decode(format!("Packet read error: {}", e)));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("Decode error (skipping packet): {}", e);
                continue;
            }
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();
        channels.get_or_insert(spec.channels.count() as u8);

        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        let actual_samples = num_frames * spec.channels.count();
        samples.extend(&sample_buf.samples()[..actual_samples]);
    }

    let channels =
        channels.ok_or_else(|| PlaybackError::Decode("Unknown channel count".to_string()))?;
    if samples.is_empty() || channels == 0 {
        return Err(PlaybackError::Decode("No audio frames decoded".to_string()));
    }

    let duration_ms = (samples.len() as u64 * 1000) / (sample_rate as u64 * channels as u64);

    Ok(DecodedClip {
        samples,
        sample_rate,
        channels,
        duration_ms,
    })
}
