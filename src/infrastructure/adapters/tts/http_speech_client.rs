//! HTTP Speech Client - 调用远程 TTS HTTP 服务
//!
//! 实现 SpeechEnginePort trait
//!
//! 外部 TTS API:
//! POST https://api.openai.com/v1/audio/speech
//! Header: Authorization: Bearer <token>
//! Request: {"model": "tts-1", "input": "...", "voice": "nova", "response_format": "mp3", "speed": 1.0}
//! Response: 音频二进制；失败时为非 2xx + 诊断文本

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::{
    AudioFormat, CredentialSourcePort, SpeechEnginePort, SpeechError, SpeechRequest,
    SynthesizedAudio,
};

/// TTS 请求体 (JSON)
#[derive(Debug, Serialize)]
struct SpeechHttpRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: AudioFormat,
    speed: f32,
}

/// HTTP Speech 客户端配置
#[derive(Debug, Clone)]
pub struct HttpSpeechClientConfig {
    /// 合成接口 URL
    pub endpoint: String,
    /// 保存 API key 的变量名
    pub api_key_var: String,
}

impl Default for HttpSpeechClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/audio/speech".to_string(),
            api_key_var: "OPENAI_API_KEY".to_string(),
        }
    }
}

impl HttpSpeechClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key_var(mut self, name: impl Into<String>) -> Self {
        self.api_key_var = name.into();
        self
    }
}

/// HTTP Speech 客户端
///
/// 不设置客户端超时，使用传输层默认行为；不重试
pub struct HttpSpeechClient {
    client: Client,
    config: HttpSpeechClientConfig,
    api_key: Option<String>,
}

impl HttpSpeechClient {
    /// 创建客户端，API key 在创建时从凭据来源读取一次
    pub fn new(
        config: HttpSpeechClientConfig,
        credentials: &dyn CredentialSourcePort,
    ) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .build()
            .map_err(|e| SpeechError::Network(e.to_string()))?;

        let api_key = credentials
            .get_variable(&config.api_key_var)
            .filter(|key| !key.is_empty());
        if api_key.is_none() {
            tracing::warn!(
                variable = %config.api_key_var,
                "API key not found, TTS requests will be sent without authorization"
            );
        }

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl SpeechEnginePort for HttpSpeechClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SynthesizedAudio, SpeechError> {
        let http_request = SpeechHttpRequest {
            model: &request.model,
            input: &request.input,
            voice: &request.voice,
            response_format: request.response_format,
            speed: request.speed,
        };

        tracing::debug!(
            url = %self.config.endpoint,
            model = %request.model,
            voice = %request.voice,
            format = %request.response_format,
            text_len = request.input.len(),
            "Sending TTS request"
        );

        let mut builder = self.client.post(&self.config.endpoint).json(&http_request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                SpeechError::Network(format!("Cannot connect to TTS service: {}", e))
            } else {
                SpeechError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(
                        status = status.as_u16(),
                        error = %e,
                        "Failed to read TTS error body"
                    );
                    format!("<unreadable response body: {}>", e)
                }
            };
            return Err(SpeechError::Api {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body,
            });
        }

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| SpeechError::Network(format!("Failed to read audio: {}", e)))?
            .to_vec();

        tracing::info!(
            audio_size = audio_data.len(),
            format = %request.response_format,
            "TTS request successful"
        );

        Ok(SynthesizedAudio {
            audio_data,
            format: request.response_format,
        })
    }
}
