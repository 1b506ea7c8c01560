//! Interactive controller: mood input, displayed art and sound, display
//! filters, and the saved-composition library.
//!
//! One user action runs at a time. Model calls block; the `generating_*`
//! flags are raised for their duration and a second request of the same
//! kind is refused while one is outstanding. Outcomes are reported as
//! [`Notice`]s, mirroring the toasts a graphical front end would show.

use chrono::{DateTime, Utc};
use echoes_spec::{
    is_placeholder_art, prepare_composition, validate_art_mood, Composition, DisplayFilters,
    ValidationError, DEFAULT_PLACEHOLDER_ART_URL,
};
use echoes_store::CompositionRepository;
use log::{error, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::actions::{self, ActionError};
use crate::flows::DEFAULT_VOICE;
use crate::model::GenerativeModel;

const ART_BUSY: &str = "Art is already generating.";
const SOUND_BUSY: &str = "A soundscape is already generating.";
const ART_NEEDED: &str = "Generate art for your mood first.";
const NOT_FOUND: &str = "That composition could not be found.";
const SAVE_FAILED: &str = "Your composition could not be saved.";
const DELETE_FAILED: &str = "Your composition could not be deleted.";

/// Why a save did not reach the library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    /// The canvas does not hold a saveable composition.
    #[error("{}", .0.message)]
    Invalid(ValidationError),
    /// The store rejected the write.
    #[error("{0}")]
    Store(ActionError),
}

impl SaveError {
    /// Message shown to the user.
    pub fn message(&self) -> &str {
        match self {
            SaveError::Invalid(err) => &err.message,
            SaveError::Store(err) => &err.error,
        }
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// The action succeeded.
    Success,
    /// The action failed.
    Error,
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Short headline.
    pub title: String,
    /// Optional detail line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notice {
    fn success(title: &str, description: Option<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.to_string(),
            description,
        }
    }

    fn error(title: &str, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.to_string(),
            description: Some(description.into()),
        }
    }
}

/// The canvas controller.
pub struct Canvas<M, R> {
    model: M,
    repository: R,
    voice: String,
    placeholder_art: String,
    mood: String,
    art: Option<String>,
    sound: Option<String>,
    filters: DisplayFilters,
    generating_art: bool,
    generating_sound: bool,
    saved: Vec<Composition>,
    notices: Vec<Notice>,
}

impl<M, R> Canvas<M, R>
where
    M: GenerativeModel,
    R: CompositionRepository,
{
    /// Creates a canvas showing the placeholder art, with the saved library
    /// loaded from `repository`.
    pub fn new(model: M, repository: R) -> Self {
        let saved = repository.load();
        Self {
            model,
            repository,
            voice: DEFAULT_VOICE.to_string(),
            placeholder_art: DEFAULT_PLACEHOLDER_ART_URL.to_string(),
            mood: String::new(),
            art: Some(DEFAULT_PLACEHOLDER_ART_URL.to_string()),
            sound: None,
            filters: DisplayFilters::default(),
            generating_art: false,
            generating_sound: false,
            saved,
            notices: Vec::new(),
        }
    }

    /// Uses `voice` for soundscapes.
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    /// Shows `url` whenever no generated art is available.
    pub fn with_placeholder_art(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        if self.shows_placeholder() {
            self.art = Some(url.clone());
        }
        self.placeholder_art = url;
        self
    }

    /// Submits a mood and generates art for it.
    ///
    /// An invalid mood is rejected without touching the canvas. Otherwise
    /// the current art and sound are cleared; on failure the placeholder art
    /// is restored.
    pub fn submit_mood(&mut self, mood: &str) -> Result<&str, ActionError> {
        if self.generating_art {
            return Err(ActionError::new(ART_BUSY));
        }
        validate_art_mood(mood).map_err(|e| ActionError::new(e.message))?;

        self.generating_art = true;
        self.art = None;
        self.sound = None;
        self.mood = mood.to_string();

        let result = actions::art_for_mood(&self.model, mood);
        self.generating_art = false;

        match result {
            Ok(art) => {
                self.notices.push(Notice::success(
                    "Canvas Generated",
                    Some(format!("Your canvas for \"{mood}\" is ready.")),
                ));
                Ok(self.art.insert(art.art_data_uri).as_str())
            }
            Err(err) => {
                self.notices
                    .push(Notice::error("Art Generation Failed", err.error.clone()));
                self.art = Some(self.placeholder_art.clone());
                Err(err)
            }
        }
    }

    /// Generates a new soundscape for the current mood.
    ///
    /// A failure keeps whatever soundscape was playing.
    pub fn cycle_soundscape(&mut self) -> Result<&str, ActionError> {
        if self.generating_sound {
            return Err(ActionError::new(SOUND_BUSY));
        }
        if !self.mood.is_empty() && self.shows_placeholder() {
            return Err(ActionError::new(ART_NEEDED));
        }

        self.generating_sound = true;
        let result = actions::sound_for_mood(&self.model, &self.mood, &self.voice);
        self.generating_sound = false;

        match result {
            Ok(sound) => {
                self.notices.push(Notice::success(
                    "Soundscape Generated",
                    Some(format!(
                        "An ambient soundscape for \"{}\" is now playing.",
                        self.mood
                    )),
                ));
                Ok(self.sound.insert(sound.sound_data_uri).as_str())
            }
            Err(err) => {
                self.notices
                    .push(Notice::error("Sound Generation Failed", err.error.clone()));
                Err(err)
            }
        }
    }

    /// Sets the display filters. Only allowed while generated art is shown.
    pub fn adjust_filters(
        &mut self,
        complexity: u16,
        intensity: u16,
    ) -> Result<DisplayFilters, ActionError> {
        if !self.can_adjust_filters() {
            return Err(ActionError::new(ART_NEEDED));
        }
        self.filters =
            DisplayFilters::new(complexity, intensity).map_err(|e| ActionError::new(e.message))?;
        Ok(self.filters)
    }

    /// Saves the current composition, stamped with the current time.
    pub fn save_composition(&mut self) -> Result<Composition, SaveError> {
        self.save_composition_at(Utc::now())
    }

    /// Saves the current composition with id `at`.
    ///
    /// A missing part or placeholder art is a [`SaveError::Invalid`] and never
    /// touches the store.
    pub fn save_composition_at(&mut self, at: DateTime<Utc>) -> Result<Composition, SaveError> {
        let mood = Some(self.mood.as_str());
        let composition =
            match prepare_composition(mood, self.art.as_deref(), self.sound.as_deref(), at) {
                Ok(composition) => composition,
                Err(err) => {
                    self.notices.push(Notice::error("Cannot Save", err.message.clone()));
                    return Err(SaveError::Invalid(err));
                }
            };

        match self.repository.append(composition.clone()) {
            Ok(saved) => {
                self.saved = saved;
                info!(
                    "event=composition_save status=ok id={} count={}",
                    composition.id,
                    self.saved.len()
                );
                self.notices.push(Notice::success(
                    "Composition Saved",
                    Some(format!(
                        "Your masterpiece for \"{}\" has been saved.",
                        composition.mood
                    )),
                ));
                Ok(composition)
            }
            Err(err) => {
                error!("event=composition_save status=error error={}", err);
                self.notices.push(Notice::error("Save Failed", SAVE_FAILED));
                Err(SaveError::Store(ActionError::new(SAVE_FAILED)))
            }
        }
    }

    /// Displays a saved composition and resets the filters.
    pub fn load_composition(&mut self, id: &str) -> Result<&Composition, ActionError> {
        let Some(index) = self.saved.iter().position(|c| c.id == id) else {
            self.notices.push(Notice::error("Composition Not Found", NOT_FOUND));
            return Err(ActionError::new(NOT_FOUND));
        };

        let composition = &self.saved[index];
        self.mood = composition.mood.clone();
        self.art = Some(composition.art_data_uri.clone());
        self.sound = Some(composition.sound_data_uri.clone());
        self.filters.reset();
        self.notices.push(Notice::success(
            "Composition Loaded",
            Some(format!(
                "Now viewing your canvas for \"{}\".",
                composition.mood
            )),
        ));
        Ok(&self.saved[index])
    }

    /// Removes every saved composition with `id`.
    pub fn delete_composition(&mut self, id: &str) -> Result<(), ActionError> {
        match self.repository.remove(id) {
            Ok(remaining) => {
                info!(
                    "event=composition_delete status=ok id={} removed={}",
                    id,
                    self.saved.len().saturating_sub(remaining.len())
                );
                self.saved = remaining;
                self.notices.push(Notice::success("Composition Deleted", None));
                Ok(())
            }
            Err(err) => {
                error!("event=composition_delete status=error error={}", err);
                self.notices.push(Notice::error("Delete Failed", DELETE_FAILED));
                Err(ActionError::new(DELETE_FAILED))
            }
        }
    }

    /// The current mood.
    pub fn mood(&self) -> &str {
        &self.mood
    }

    /// The displayed art; `None` while art is generating.
    pub fn art(&self) -> Option<&str> {
        self.art.as_deref()
    }

    /// The current soundscape.
    pub fn sound(&self) -> Option<&str> {
        self.sound.as_deref()
    }

    /// Current display filters.
    pub fn filters(&self) -> DisplayFilters {
        self.filters
    }

    /// True while the displayed art is a placeholder image.
    pub fn shows_placeholder(&self) -> bool {
        self.art.as_deref().is_some_and(is_placeholder_art)
            || self.art.as_deref() == Some(self.placeholder_art.as_str())
    }

    /// True if any art request is outstanding.
    pub fn is_generating_art(&self) -> bool {
        self.generating_art
    }

    /// True if any sound request is outstanding.
    pub fn is_generating_sound(&self) -> bool {
        self.generating_sound
    }

    /// Whether the filter controls are enabled.
    pub fn can_adjust_filters(&self) -> bool {
        !self.is_generating_art() && self.art.is_some() && !self.shows_placeholder()
    }

    /// Whether a soundscape can be requested.
    pub fn can_cycle_soundscape(&self) -> bool {
        !self.is_generating_sound() && !self.mood.is_empty() && !self.shows_placeholder()
    }

    /// Whether the save control is enabled.
    pub fn can_save(&self) -> bool {
        self.art.is_some() && self.sound.is_some() && !self.shows_placeholder()
    }

    /// The saved library, in save order.
    pub fn saved(&self) -> &[Composition] {
        &self.saved
    }

    /// Notices raised so far.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drains the raised notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// The persistence port.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// The model port.
    pub fn model(&self) -> &M {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ART_FAILED, SOUND_FAILED};
    use crate::model::{Media, ModelCall, ScriptedModel};
    use chrono::TimeZone;
    use echoes_spec::ErrorCode;
    use echoes_store::{CompositionStore, KeyValueStorage, MemoryStorage, PersistenceError};
    use pretty_assertions::assert_eq;

    type TestCanvas = Canvas<ScriptedModel, CompositionStore<MemoryStorage>>;

    fn canvas(model: ScriptedModel) -> TestCanvas {
        Canvas::new(model, CompositionStore::new(MemoryStorage::new()))
    }

    fn model() -> ScriptedModel {
        ScriptedModel::new().with_image(Media::from_base64("image/png", "iVBORw=="))
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_starts_with_placeholder() {
        let c = canvas(model());
        assert_eq!(c.art(), Some(DEFAULT_PLACEHOLDER_ART_URL));
        assert!(c.shows_placeholder());
        assert!(!c.can_adjust_filters());
        assert!(!c.can_cycle_soundscape());
        assert!(!c.can_save());
        assert_eq!(c.filters().css_filter(), "contrast(100%) saturate(100%)");
    }

    #[test]
    fn test_submit_mood_shows_art() {
        let mut c = canvas(model());
        let art = c.submit_mood("serene").unwrap().to_string();
        assert_eq!(art, "data:image/png;base64,iVBORw==");
        assert_eq!(c.mood(), "serene");
        assert!(!c.is_generating_art());
        assert!(c.can_adjust_filters());
        assert!(c.can_cycle_soundscape());
        assert_eq!(
            c.notices().last().map(|n| n.title.as_str()),
            Some("Canvas Generated")
        );
    }

    #[test]
    fn test_invalid_mood_leaves_canvas_untouched() {
        let mut c = canvas(model());
        c.submit_mood("serene").unwrap();
        c.cycle_soundscape().unwrap();

        let err = c.submit_mood(" x ").unwrap_err();
        assert_eq!(
            err.error,
            "Please describe your mood with at least 2 characters."
        );
        assert_eq!(c.mood(), "serene");
        assert!(c.sound().is_some());
        assert_eq!(c.model().call_count(), 2);
    }

    #[test]
    fn test_failed_art_restores_placeholder_and_clears_sound() {
        let mut c = canvas(model());
        c.submit_mood("serene").unwrap();
        c.cycle_soundscape().unwrap();

        let mut c = Canvas {
            model: ScriptedModel::new().failing_image("quota exceeded"),
            ..c
        };
        let err = c.submit_mood("stormy").unwrap_err();
        assert_eq!(err.error, ART_FAILED);
        assert_eq!(c.art(), Some(DEFAULT_PLACEHOLDER_ART_URL));
        assert_eq!(c.sound(), None);
        assert_eq!(c.mood(), "stormy");

        let notice = c.notices().last().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.title, "Art Generation Failed");
        assert_eq!(notice.description.as_deref(), Some(ART_FAILED));
    }

    #[test]
    fn test_custom_placeholder_restored_on_failure() {
        let mut c = canvas(ScriptedModel::new().failing_image("down"))
            .with_placeholder_art("https://picsum.photos/seed/custom/512/512");
        assert_eq!(c.art(), Some("https://picsum.photos/seed/custom/512/512"));
        c.submit_mood("serene").unwrap_err();
        assert_eq!(c.art(), Some("https://picsum.photos/seed/custom/512/512"));
    }

    #[test]
    fn test_busy_flags_refuse_second_request() {
        let mut c = canvas(model());
        c.generating_art = true;
        assert_eq!(c.submit_mood("serene").unwrap_err().error, ART_BUSY);

        c.generating_art = false;
        c.submit_mood("serene").unwrap();
        c.generating_sound = true;
        assert!(c.is_generating_sound());
        assert!(!c.can_cycle_soundscape());
        assert_eq!(c.cycle_soundscape().unwrap_err().error, SOUND_BUSY);
        assert_eq!(c.model().call_count(), 1);

        c.generating_sound = false;
        c.cycle_soundscape().unwrap();
        assert!(!c.is_generating_sound());
    }

    #[test]
    fn test_cycle_soundscape_uses_mood_and_voice() {
        let mut c = canvas(model()).with_voice("Kore");
        c.submit_mood("wistful").unwrap();
        let sound = c.cycle_soundscape().unwrap().to_string();
        assert!(sound.starts_with("data:audio/wav;base64,UklGR"));

        match c.model().calls().last() {
            Some(ModelCall::Speech { prompt, voice }) => {
                assert!(prompt.contains("mood: wistful."));
                assert_eq!(voice, "Kore");
            }
            other => panic!("expected speech call, got {other:?}"),
        }
    }

    #[test]
    fn test_cycle_soundscape_without_mood() {
        let mut c = canvas(model());
        let err = c.cycle_soundscape().unwrap_err();
        assert_eq!(err.error, "A mood is required to generate a soundscape.");
        assert_eq!(c.model().call_count(), 0);
    }

    #[test]
    fn test_failed_soundscape_keeps_previous_sound() {
        let mut c = canvas(model());
        c.submit_mood("serene").unwrap();
        let first = c.cycle_soundscape().unwrap().to_string();

        let mut c = Canvas {
            model: model().failing_speech("timeout"),
            ..c
        };
        let err = c.cycle_soundscape().unwrap_err();
        assert_eq!(err.error, SOUND_FAILED);
        assert_eq!(c.sound(), Some(first.as_str()));
    }

    #[test]
    fn test_filters_gated_and_validated() {
        let mut c = canvas(model());
        assert_eq!(c.adjust_filters(150, 50).unwrap_err().error, ART_NEEDED);

        c.submit_mood("serene").unwrap();
        let filters = c.adjust_filters(150, 50).unwrap();
        assert_eq!(filters.css_filter(), "contrast(150%) saturate(50%)");
        assert!(c.adjust_filters(201, 100).is_err());
        assert_eq!(c.filters(), filters);
    }

    #[test]
    fn test_save_requires_art_and_sound() {
        let mut c = canvas(model());
        let err = c.save_composition_at(at()).unwrap_err();
        assert_eq!(
            err.message(),
            "Please generate both art and a soundscape before saving."
        );
        assert!(
            matches!(err, SaveError::Invalid(ref v) if v.code == ErrorCode::IncompleteComposition)
        );

        c.submit_mood("serene").unwrap();
        let err = c.save_composition_at(at()).unwrap_err();
        assert!(
            matches!(err, SaveError::Invalid(ref v) if v.code == ErrorCode::IncompleteComposition)
        );
        assert!(c.repository().load().is_empty());
        assert_eq!(c.notices().last().unwrap().title, "Cannot Save");
    }

    #[test]
    fn test_save_rejects_placeholder_art_with_sound() {
        let mut c = canvas(model());
        c.mood = "serene".to_string();
        c.sound = Some("data:audio/wav;base64,UklGRg==".to_string());
        assert!(c.shows_placeholder());

        let err = c.save_composition_at(at()).unwrap_err();
        assert!(matches!(err, SaveError::Invalid(ref v) if v.code == ErrorCode::PlaceholderArt));
        assert!(c.repository().load().is_empty());
    }

    #[test]
    fn test_save_then_reload_library() {
        let mut c = canvas(model());
        c.submit_mood("serene").unwrap();
        c.cycle_soundscape().unwrap();

        let saved = c.save_composition_at(at()).unwrap();
        assert_eq!(saved.id, "2025-03-14T09:26:53.000Z");
        assert_eq!(saved.mood, "serene");
        assert_eq!(c.saved(), &[saved.clone()]);
        assert_eq!(c.repository().load(), vec![saved]);
        assert_eq!(
            c.notices().last().and_then(|n| n.description.as_deref()),
            Some("Your masterpiece for \"serene\" has been saved.")
        );
    }

    #[test]
    fn test_load_composition_resets_filters() {
        let mut c = canvas(model());
        c.submit_mood("serene").unwrap();
        c.cycle_soundscape().unwrap();
        let saved = c.save_composition_at(at()).unwrap();

        c.submit_mood("restless").unwrap();
        c.adjust_filters(10, 190).unwrap();

        let loaded = c.load_composition(&saved.id).unwrap().clone();
        assert_eq!(loaded, saved);
        assert_eq!(c.mood(), "serene");
        assert_eq!(c.art(), Some(saved.art_data_uri.as_str()));
        assert_eq!(c.sound(), Some(saved.sound_data_uri.as_str()));
        assert_eq!(c.filters(), DisplayFilters::default());
    }

    #[test]
    fn test_load_unknown_composition() {
        let mut c = canvas(model());
        assert_eq!(c.load_composition("nope").unwrap_err().error, NOT_FOUND);
    }

    #[test]
    fn test_delete_composition() {
        let mut c = canvas(model());
        c.submit_mood("serene").unwrap();
        c.cycle_soundscape().unwrap();
        let saved = c.save_composition_at(at()).unwrap();

        c.delete_composition(&saved.id).unwrap();
        assert!(c.saved().is_empty());
        assert!(c.repository().load().is_empty());
        assert_eq!(c.notices().last().unwrap().title, "Composition Deleted");

        // Unknown ids are accepted and change nothing.
        c.delete_composition("missing").unwrap();
    }

    #[test]
    fn test_library_loaded_at_startup() {
        let existing = Composition::new(
            "id-1",
            "calm",
            "data:image/png;base64,AA==",
            "data:audio/wav;base64,AA==",
        );
        let mut store = CompositionStore::new(MemoryStorage::new());
        store.append(existing.clone()).unwrap();

        let c = Canvas::new(model(), store);
        assert_eq!(c.saved(), &[existing]);
    }

    struct ReadOnlyStorage;

    impl KeyValueStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
            Ok(None)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::InvalidKey(key.to_string()))
        }
    }

    #[test]
    fn test_storage_failure_reported() {
        let mut c = Canvas::new(model(), CompositionStore::new(ReadOnlyStorage));
        c.submit_mood("serene").unwrap();
        c.cycle_soundscape().unwrap();

        let err = c.save_composition_at(at()).unwrap_err();
        assert_eq!(err, SaveError::Store(ActionError::new(SAVE_FAILED)));
        assert_eq!(err.message(), SAVE_FAILED);
        assert!(c.saved().is_empty());
        assert_eq!(c.notices().last().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn test_take_notices_drains() {
        let mut c = canvas(model());
        c.submit_mood("serene").unwrap();
        assert_eq!(c.take_notices().len(), 1);
        assert!(c.notices().is_empty());
    }
}
