//! Emotional Echoes Domain Library
//!
//! This crate provides the types shared by every part of Emotional Echoes:
//! the persisted [`Composition`], the local validation rules that guard
//! model calls and saves, display filters, and data URI helpers.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use echoes_spec::validation::{prepare_composition, validate_art_mood};
//!
//! validate_art_mood("serene").unwrap();
//!
//! let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
//! let composition = prepare_composition(
//!     Some("serene"),
//!     Some("data:image/png;base64,iVBORw0KGgo="),
//!     Some("data:audio/wav;base64,UklGRg=="),
//!     at,
//! )
//! .unwrap();
//! assert_eq!(composition.id, "2025-03-14T09:26:53.000Z");
//! ```
//!
//! # Modules
//!
//! - [`composition`]: the persisted composition entity
//! - [`data_uri`]: `data:<mime>;base64,<payload>` formatting and parsing
//! - [`error`]: validation error codes
//! - [`filters`]: display filter settings
//! - [`validation`]: mood and save preconditions

pub mod composition;
pub mod data_uri;
pub mod error;
pub mod filters;
pub mod validation;

// Re-export commonly used types at the crate root
pub use composition::{composition_id, Composition};
pub use data_uri::{
    data_uri_payload, extension_for_mime, format_data_uri, mime_essence, mime_parameter,
    parse_data_uri, DataUri, DataUriError,
};
pub use error::{ErrorCode, ValidationError};
pub use filters::{DisplayFilters, DEFAULT_FILTER_VALUE, MAX_FILTER_VALUE};
pub use validation::{
    is_placeholder_art, prepare_composition, validate_art_mood, validate_sound_mood,
    DEFAULT_PLACEHOLDER_ART_URL, MIN_ART_MOOD_CHARS, PLACEHOLDER_ART_PREFIX,
};
