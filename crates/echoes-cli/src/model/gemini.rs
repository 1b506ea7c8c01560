//! Gemini HTTP adapter.
//!
//! Images come from the Imagen `:predict` endpoint; soundscapes come from a
//! TTS model's `:generateContent` endpoint with an audio-only response
//! modality. Both answer with base64 payloads, which are passed on as data
//! URIs without decoding.

use std::time::Duration;

use log::{debug, info};
use serde_json::{json, Value};

use super::{GenerationError, GenerativeModel, Media};

const API_KEY_HEADER: &str = "x-goog-api-key";
const DEFAULT_IMAGE_MIME: &str = "image/png";
const DEFAULT_SPEECH_MIME: &str = "audio/L16;codec=pcm;rate=24000";

/// Connection settings for [`GeminiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiSettings {
    /// API key sent with every request.
    pub api_key: String,
    /// Base URL, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub base_url: String,
    /// Image model id.
    pub art_model: String,
    /// Speech model id.
    pub sound_model: String,
    /// Per-request timeout; `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

/// Blocking client for the hosted Gemini models.
#[derive(Debug)]
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    settings: GeminiSettings,
}

impl GeminiClient {
    /// Builds a client. An empty API key is reported when a request is made.
    pub fn new(settings: GeminiSettings) -> Result<Self, GenerationError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| GenerationError::Transport {
                endpoint: settings.base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { http, settings })
    }

    /// The settings this client was built with.
    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.settings.base_url.trim_end_matches('/'),
            model,
            method
        )
    }

    fn post(&self, endpoint: &str, body: &Value) -> Result<Value, GenerationError> {
        if self.settings.api_key.trim().is_empty() {
            return Err(GenerationError::MissingApiKey);
        }
        debug!("event=model_request status=start endpoint={}", endpoint);
        let transport = |e: reqwest::Error| GenerationError::Transport {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        };

        let resp = self
            .http
            .post(endpoint)
            .header(API_KEY_HEADER, &self.settings.api_key)
            .json(body)
            .send()
            .map_err(transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(GenerationError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = resp.json().map_err(transport)?;
        info!(
            "event=model_request status=ok endpoint={} http_status={}",
            endpoint,
            status.as_u16()
        );
        Ok(value)
    }
}

impl GenerativeModel for GeminiClient {
    fn generate_image(&self, prompt: &str) -> Result<Option<Media>, GenerationError> {
        let endpoint = self.endpoint(&self.settings.art_model, "predict");
        let response = self.post(&endpoint, &image_request_body(prompt))?;
        parse_image_response(&response)
    }

    fn generate_speech(&self, prompt: &str, voice: &str) -> Result<Option<Media>, GenerationError> {
        let endpoint = self.endpoint(&self.settings.sound_model, "generateContent");
        let response = self.post(&endpoint, &speech_request_body(prompt, voice))?;
        parse_speech_response(&response)
    }
}

pub(crate) fn image_request_body(prompt: &str) -> Value {
    json!({
        "instances": [{ "prompt": prompt }],
        "parameters": { "sampleCount": 1 },
    })
}

pub(crate) fn speech_request_body(prompt: &str, voice: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseModalities": ["AUDIO"],
            "speechConfig": {
                "voiceConfig": {
                    "prebuiltVoiceConfig": { "voiceName": voice },
                },
            },
        },
    })
}

/// Reads `predictions[0].bytesBase64Encoded`. A response without
/// predictions (e.g. filtered by safety settings) has no media.
pub(crate) fn parse_image_response(response: &Value) -> Result<Option<Media>, GenerationError> {
    let object = response.as_object().ok_or_else(|| {
        GenerationError::MalformedResponse("expected a JSON object".to_string())
    })?;

    let Some(prediction) = object
        .get("predictions")
        .and_then(Value::as_array)
        .and_then(|predictions| predictions.first())
    else {
        return Ok(None);
    };

    let Some(payload) = prediction.get("bytesBase64Encoded").and_then(Value::as_str) else {
        return Ok(None);
    };
    let mime = prediction
        .get("mimeType")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_IMAGE_MIME);

    Ok(Some(Media::from_base64(mime, payload)))
}

/// Reads the first `inlineData` part of the first candidate.
pub(crate) fn parse_speech_response(response: &Value) -> Result<Option<Media>, GenerationError> {
    let object = response.as_object().ok_or_else(|| {
        GenerationError::MalformedResponse("expected a JSON object".to_string())
    })?;

    let parts = object
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.pointer("/content/parts"))
        .and_then(Value::as_array);

    let Some(inline) = parts
        .into_iter()
        .flatten()
        .find_map(|part| part.get("inlineData"))
    else {
        return Ok(None);
    };

    let Some(payload) = inline.get("data").and_then(Value::as_str) else {
        return Ok(None);
    };
    let mime = inline
        .get("mimeType")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_SPEECH_MIME);

    Ok(Some(Media::from_base64(mime, payload)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings() -> GeminiSettings {
        GeminiSettings {
            api_key: "test-key".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta/".to_string(),
            art_model: "imagen-4.0-fast-generate-001".to_string(),
            sound_model: "gemini-2.5-flash-preview-tts".to_string(),
            request_timeout: None,
        }
    }

    #[test]
    fn test_empty_api_key_rejected_before_sending() {
        let mut s = settings();
        s.api_key = "  ".to_string();
        let client = GeminiClient::new(s).unwrap();
        assert!(matches!(
            client.generate_image("calm"),
            Err(GenerationError::MissingApiKey)
        ));
        assert!(matches!(
            client.generate_speech("calm", "Algenib"),
            Err(GenerationError::MissingApiKey)
        ));
    }

    #[test]
    fn test_endpoints_join_base_url() {
        let client = GeminiClient::new(settings()).unwrap();
        assert_eq!(
            client.endpoint("imagen-4.0-fast-generate-001", "predict"),
            "https://generativelanguage.googleapis.com/v1beta/models/imagen-4.0-fast-generate-001:predict"
        );
    }

    #[test]
    fn test_image_request_body_shape() {
        assert_eq!(
            image_request_body("a calm sea"),
            json!({
                "instances": [{ "prompt": "a calm sea" }],
                "parameters": { "sampleCount": 1 },
            })
        );
    }

    #[test]
    fn test_speech_request_body_is_audio_only_with_voice() {
        let body = speech_request_body("wind", "Algenib");
        assert_eq!(body.pointer("/contents/0/parts/0/text"), Some(&json!("wind")));
        assert_eq!(
            body.pointer("/generationConfig/responseModalities"),
            Some(&json!(["AUDIO"]))
        );
        assert_eq!(
            body.pointer("/generationConfig/speechConfig/voiceConfig/prebuiltVoiceConfig/voiceName"),
            Some(&json!("Algenib"))
        );
    }

    #[test]
    fn test_parse_image_response() {
        let response = json!({
            "predictions": [{ "bytesBase64Encoded": "iVBORw==", "mimeType": "image/jpeg" }]
        });
        let media = parse_image_response(&response).unwrap().unwrap();
        assert_eq!(media.url, "data:image/jpeg;base64,iVBORw==");
        assert_eq!(media.content_type.as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn test_parse_image_response_defaults_to_png() {
        let response = json!({ "predictions": [{ "bytesBase64Encoded": "AAAA" }] });
        let media = parse_image_response(&response).unwrap().unwrap();
        assert_eq!(media.url, "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_parse_image_response_without_predictions() {
        assert_eq!(parse_image_response(&json!({})).unwrap(), None);
        assert_eq!(parse_image_response(&json!({ "predictions": [] })).unwrap(), None);
        assert_eq!(
            parse_image_response(&json!({ "predictions": [{ "raiFilteredReason": "x" }] }))
                .unwrap(),
            None
        );
        assert!(matches!(
            parse_image_response(&json!([1, 2])),
            Err(GenerationError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_speech_response_finds_inline_data() {
        let response = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "ignored" },
                        { "inlineData": { "mimeType": "audio/L16;codec=pcm;rate=24000", "data": "AAEC" } }
                    ]
                }
            }]
        });
        let media = parse_speech_response(&response).unwrap().unwrap();
        assert_eq!(media.url, "data:audio/L16;codec=pcm;rate=24000;base64,AAEC");
    }

    #[test]
    fn test_parse_speech_response_without_audio() {
        assert_eq!(parse_speech_response(&json!({ "candidates": [] })).unwrap(), None);
        let text_only = json!({
            "candidates": [{ "content": { "parts": [{ "text": "hello" }] } }]
        });
        assert_eq!(parse_speech_response(&text_only).unwrap(), None);
        assert!(matches!(
            parse_speech_response(&json!("nope")),
            Err(GenerationError::MalformedResponse(_))
        ));
    }
}
