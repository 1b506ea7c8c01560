//! Action boundary between the controller and the generation flows.
//!
//! Actions validate locally first, so an invalid mood never reaches a
//! model. Any generation failure is logged in full and replaced by a fixed
//! user-facing message. Nothing here terminates the process.

use echoes_spec::{validate_art_mood, validate_sound_mood};
use log::error;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flows;
use crate::model::GenerativeModel;

/// Shown when art generation fails for any reason.
pub const ART_FAILED: &str = "Failed to generate art. Please try again later.";

/// Shown when soundscape generation fails for any reason.
pub const SOUND_FAILED: &str = "Failed to generate soundscape. Please try again later.";

/// A user-facing action failure, serialized as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{error}")]
pub struct ActionError {
    /// Message shown to the user.
    pub error: String,
}

impl ActionError {
    /// Creates an action error with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Successful art action, serialized as `{"artDataUri": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtResult {
    /// The generated image as a data URI.
    pub art_data_uri: String,
}

/// Successful sound action, serialized as `{"soundDataUri": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundResult {
    /// The soundscape as `data:audio/wav;base64,...`.
    pub sound_data_uri: String,
}

/// Generates art for `mood`.
pub fn art_for_mood<M>(model: &M, mood: &str) -> Result<ArtResult, ActionError>
where
    M: GenerativeModel + ?Sized,
{
    validate_art_mood(mood).map_err(|e| ActionError::new(e.message))?;

    match flows::generate_art(model, mood) {
        Ok(art_data_uri) => Ok(ArtResult { art_data_uri }),
        Err(err) => {
            error!("event=art_generation status=error error={}", err);
            Err(ActionError::new(ART_FAILED))
        }
    }
}

/// Generates a soundscape for `mood` using `voice`.
pub fn sound_for_mood<M>(model: &M, mood: &str, voice: &str) -> Result<SoundResult, ActionError>
where
    M: GenerativeModel + ?Sized,
{
    validate_sound_mood(mood).map_err(|e| ActionError::new(e.message))?;

    match flows::generate_soundscape(model, mood, voice) {
        Ok(sound_data_uri) => Ok(SoundResult { sound_data_uri }),
        Err(err) => {
            error!("event=sound_generation status=error error={}", err);
            Err(ActionError::new(SOUND_FAILED))
        }
    }
}
