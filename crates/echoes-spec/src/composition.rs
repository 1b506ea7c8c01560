//! The persisted composition entity.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A saved pairing of a mood with its generated art and soundscape.
///
/// Serialized with camelCase keys; a stored document is a JSON array of
/// these objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    /// ISO-8601 save timestamp. Doubles as identity and ordering key.
    pub id: String,
    /// The mood the user typed.
    pub mood: String,
    /// Art as `data:image/...;base64,...`.
    pub art_data_uri: String,
    /// Soundscape as `data:audio/wav;base64,...`.
    pub sound_data_uri: String,
}

impl Composition {
    /// Creates a composition from its parts.
    pub fn new(
        id: impl Into<String>,
        mood: impl Into<String>,
        art_data_uri: impl Into<String>,
        sound_data_uri: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            mood: mood.into(),
            art_data_uri: art_data_uri.into(),
            sound_data_uri: sound_data_uri.into(),
        }
    }

    /// Parses the save time back out of the id.
    ///
    /// Returns `None` for ids that are not RFC 3339 timestamps.
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.id)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Formats a save time as a composition id (`2025-03-14T09:26:53.589Z`).
///
/// Two saves within the same millisecond produce the same id.
pub fn composition_id(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
