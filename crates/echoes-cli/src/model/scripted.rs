//! In-process model with canned replies.

use std::cell::RefCell;

use base64::Engine as _;

use super::{GenerationError, GenerativeModel, Media};

/// A 1x1 PNG.
const TINY_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// 100 ms of 16-bit mono silence at 24 kHz.
const SILENCE_BYTES: usize = 4_800;

#[derive(Debug, Clone)]
enum Reply {
    Media(Media),
    Empty,
    Fail(String),
}

impl Reply {
    fn produce(&self) -> Result<Option<Media>, GenerationError> {
        match self {
            Reply::Media(media) => Ok(Some(media.clone())),
            Reply::Empty => Ok(None),
            Reply::Fail(message) => Err(GenerationError::Transport {
                endpoint: "scripted".to_string(),
                message: message.clone(),
            }),
        }
    }
}

/// A request the scripted model received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelCall {
    /// `generate_image(prompt)`
    Image {
        /// The prompt text.
        prompt: String,
    },
    /// `generate_speech(prompt, voice)`
    Speech {
        /// The prompt text.
        prompt: String,
        /// The requested voice.
        voice: String,
    },
}

/// [`GenerativeModel`] that answers from a script and records every call.
///
/// By default images are a tiny PNG and speech is a short burst of PCM
/// silence tagged `audio/L16;codec=pcm;rate=24000`.
#[derive(Debug)]
pub struct ScriptedModel {
    image: Reply,
    speech: Reply,
    calls: RefCell<Vec<ModelCall>>,
}

impl Default for ScriptedModel {
    fn default() -> Self {
        let silence =
            base64::engine::general_purpose::STANDARD.encode(vec![0u8; SILENCE_BYTES]);
        Self {
            image: Reply::Media(Media::from_base64("image/png", TINY_PNG_BASE64)),
            speech: Reply::Media(Media::from_base64(
                "audio/L16;codec=pcm;rate=24000",
                &silence,
            )),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl ScriptedModel {
    /// Creates a model with the default replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies to image requests with `media`.
    pub fn with_image(mut self, media: Media) -> Self {
        self.image = Reply::Media(media);
        self
    }

    /// Replies to speech requests with `media`.
    pub fn with_speech(mut self, media: Media) -> Self {
        self.speech = Reply::Media(media);
        self
    }

    /// Replies to image requests without media.
    pub fn without_image(mut self) -> Self {
        self.image = Reply::Empty;
        self
    }

    /// Replies to speech requests without media.
    pub fn without_speech(mut self) -> Self {
        self.speech = Reply::Empty;
        self
    }

    /// Fails image requests with `message`.
    pub fn failing_image(mut self, message: impl Into<String>) -> Self {
        self.image = Reply::Fail(message.into());
        self
    }

    /// Fails speech requests with `message`.
    pub fn failing_speech(mut self, message: impl Into<String>) -> Self {
        self.speech = Reply::Fail(message.into());
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<ModelCall> {
        self.calls.borrow().clone()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl GenerativeModel for ScriptedModel {
    fn generate_image(&self, prompt: &str) -> Result<Option<Media>, GenerationError> {
        self.calls.borrow_mut().push(ModelCall::Image {
            prompt: prompt.to_string(),
        });
        self.image.produce()
    }

    fn generate_speech(&self, prompt: &str, voice: &str) -> Result<Option<Media>, GenerationError> {
        self.calls.borrow_mut().push(ModelCall::Speech {
            prompt: prompt.to_string(),
            voice: voice.to_string(),
        });
        self.speech.produce()
    }
}
