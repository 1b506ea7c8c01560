//! Request/response shaping around the art and soundscape models.

use base64::Engine as _;
use echoes_audio::{encode_data_uri, AudioFormat, DEFAULT_SAMPLE_RATE};
use echoes_spec::{data_uri_payload, mime_parameter};
use log::debug;

use crate::model::{GenerationError, GenerativeModel, Media};

/// Prebuilt voice used for soundscapes.
pub const DEFAULT_VOICE: &str = "Algenib";

/// Prompt sent to the image model.
pub fn art_prompt(mood: &str) -> String {
    format!(
        "Generate a unique abstract art pattern that reflects the mood: {mood}. \
         The art should have an ethereal theme with deep purples, teals, and soft golds."
    )
}

/// Prompt sent to the speech model.
pub fn soundscape_prompt(mood: &str) -> String {
    format!(
        "Generate an ambient soundscape for the mood: {mood}. \
         Do not use any speech. Just generate sounds. "
    )
}

/// Asks the image model for art and returns its data URI.
pub fn generate_art<M>(model: &M, mood: &str) -> Result<String, GenerationError>
where
    M: GenerativeModel + ?Sized,
{
    let media = model
        .generate_image(&art_prompt(mood))?
        .ok_or(GenerationError::NoMedia)?;
    debug!(
        "event=art_generated status=ok mime={}",
        media.mime_type().unwrap_or("unknown")
    );
    Ok(media.url)
}

/// Asks the speech model for a soundscape and returns it as a WAV data URI.
///
/// The model answers with raw 16-bit mono PCM; its base64 payload (the
/// text after the first comma of the media URL) is decoded and wrapped in a
/// WAV container.
pub fn generate_soundscape<M>(model: &M, mood: &str, voice: &str) -> Result<String, GenerationError>
where
    M: GenerativeModel + ?Sized,
{
    let media = model
        .generate_speech(&soundscape_prompt(mood), voice)?
        .ok_or(GenerationError::NoMedia)?;

    let pcm = base64::engine::general_purpose::STANDARD
        .decode(data_uri_payload(&media.url).trim())
        .map_err(|e| GenerationError::InvalidPayload(e.to_string()))?;

    let format = AudioFormat::mono(pcm_sample_rate(&media));
    debug!(
        "event=soundscape_generated status=ok pcm_bytes={} sample_rate={}",
        pcm.len(),
        format.sample_rate
    );
    Ok(encode_data_uri(&pcm, &format)?)
}

/// Sample rate declared by the media type's `rate=` parameter, else 24 kHz.
pub fn pcm_sample_rate(media: &Media) -> u32 {
    media
        .mime_type()
        .and_then(|mime| mime_parameter(mime, "rate"))
        .and_then(|rate| rate.parse::<u32>().ok())
        .filter(|rate| *rate > 0)
        .unwrap_or(DEFAULT_SAMPLE_RATE)
}
