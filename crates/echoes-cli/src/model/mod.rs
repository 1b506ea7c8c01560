//! Generative model port.
//!
//! Image and speech synthesis are opaque external services. This module
//! defines the request/response seam the flows call through, a Gemini HTTP
//! implementation, and a scripted in-process model for tests and offline
//! runs.

mod gemini;
mod scripted;

pub use gemini::{GeminiClient, GeminiSettings};
pub use scripted::{ModelCall, ScriptedModel};

use echoes_audio::EncodeError;
use thiserror::Error;

/// A media item returned by a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    /// Declared media type, when the model reports one separately from the URL.
    pub content_type: Option<String>,
    /// `data:<mime>;base64,<payload>` URI holding the media bytes.
    pub url: String,
}

impl Media {
    /// Creates a media item from a mime type and base64 payload.
    pub fn from_base64(content_type: impl Into<String>, payload: &str) -> Self {
        let content_type = content_type.into();
        Self {
            url: format!("data:{content_type};base64,{payload}"),
            content_type: Some(content_type),
        }
    }

    /// Media type from `content_type`, falling back to the data URI header.
    pub fn mime_type(&self) -> Option<&str> {
        if let Some(content_type) = self.content_type.as_deref() {
            return Some(content_type);
        }
        let header = self.url.strip_prefix("data:")?.split_once(',')?.0;
        Some(header.strip_suffix(";base64").unwrap_or(header))
    }
}

/// Failure talking to a model or shaping its output.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API key was configured for a hosted model.
    #[error("no API key configured (set GEMINI_API_KEY or api_key in the config file)")]
    MissingApiKey,

    /// The HTTP request could not be sent or its body read.
    #[error("request to {endpoint} failed: {message}")]
    Transport {
        /// Endpoint path.
        endpoint: String,
        /// Client error text.
        message: String,
    },

    /// The endpoint answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        /// Endpoint path.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The response did not have the expected shape.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    /// The model answered without any media.
    #[error("no media returned")]
    NoMedia,

    /// The media payload was not valid base64.
    #[error("media payload is not valid base64: {0}")]
    InvalidPayload(String),

    /// The PCM could not be packaged as WAV.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// The external image and speech models.
pub trait GenerativeModel {
    /// Generates one image for `prompt`. `Ok(None)` means the model answered
    /// without media.
    fn generate_image(&self, prompt: &str) -> Result<Option<Media>, GenerationError>;

    /// Generates audio-only output for `prompt` using the prebuilt `voice`.
    fn generate_speech(&self, prompt: &str, voice: &str) -> Result<Option<Media>, GenerationError>;
}

impl<M: GenerativeModel + ?Sized> GenerativeModel for &M {
    fn generate_image(&self, prompt: &str) -> Result<Option<Media>, GenerationError> {
        (**self).generate_image(prompt)
    }

    fn generate_speech(&self, prompt: &str, voice: &str) -> Result<Option<Media>, GenerationError> {
        (**self).generate_speech(prompt, voice)
    }
}

impl<M: GenerativeModel + ?Sized> GenerativeModel for Box<M> {
    fn generate_image(&self, prompt: &str) -> Result<Option<Media>, GenerationError> {
        (**self).generate_image(prompt)
    }

    fn generate_speech(&self, prompt: &str, voice: &str) -> Result<Option<Media>, GenerationError> {
        (**self).generate_speech(prompt, voice)
    }
}
