//! Local validation rules.
//!
//! These run before any model call or save; a failure never reaches the
//! external collaborators or the store.

use chrono::{DateTime, Utc};

use crate::composition::{composition_id, Composition};
use crate::error::{ErrorCode, ValidationError};

/// Minimum trimmed mood length, in UTF-16 code units, for art generation.
pub const MIN_ART_MOOD_CHARS: usize = 2;

/// Art URIs starting with this prefix are placeholders, not generated art.
pub const PLACEHOLDER_ART_PREFIX: &str = "https://picsum.photos";

/// Image shown before any art has been generated.
pub const DEFAULT_PLACEHOLDER_ART_URL: &str = "https://picsum.photos/seed/emotional-echoes/1024/1024";

const MOOD_TOO_SHORT: &str = "Please describe your mood with at least 2 characters.";
const MOOD_REQUIRED: &str = "A mood is required to generate a soundscape.";
const CANNOT_SAVE: &str = "Please generate both art and a soundscape before saving.";

/// Checks a mood before requesting art.
pub fn validate_art_mood(mood: &str) -> Result<(), ValidationError> {
    if mood.trim().encode_utf16().count() < MIN_ART_MOOD_CHARS {
        return Err(ValidationError::new(ErrorCode::MoodTooShort, MOOD_TOO_SHORT));
    }
    Ok(())
}

/// Checks a mood before requesting a soundscape.
pub fn validate_sound_mood(mood: &str) -> Result<(), ValidationError> {
    if mood.is_empty() {
        return Err(ValidationError::new(ErrorCode::MoodRequired, MOOD_REQUIRED));
    }
    Ok(())
}

/// Returns true if `art_uri` is a placeholder image rather than generated art.
pub fn is_placeholder_art(art_uri: &str) -> bool {
    art_uri.starts_with(PLACEHOLDER_ART_PREFIX)
}

/// Builds a composition for saving, enforcing the save preconditions.
///
/// Mood, art, and sound must all be present and non-empty, and the art must
/// not be a placeholder. The id is the ISO-8601 form of `at`.
pub fn prepare_composition(
    mood: Option<&str>,
    art_data_uri: Option<&str>,
    sound_data_uri: Option<&str>,
    at: DateTime<Utc>,
) -> Result<Composition, ValidationError> {
    fn present(value: Option<&str>) -> Option<&str> {
        value.filter(|v| !v.is_empty())
    }

    let (Some(mood), Some(art), Some(sound)) = (
        present(mood),
        present(art_data_uri),
        present(sound_data_uri),
    ) else {
        return Err(ValidationError::new(
            ErrorCode::IncompleteComposition,
            CANNOT_SAVE,
        ));
    };

    if is_placeholder_art(art) {
        return Err(ValidationError::new(ErrorCode::PlaceholderArt, CANNOT_SAVE));
    }

    Ok(Composition::new(composition_id(at), mood, art, sound))
}
