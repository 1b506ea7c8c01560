//! Error types for local validation.

/// Stable codes for local validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Mood shorter than the art-generation minimum
    MoodTooShort,
    /// E002: Mood missing for soundscape generation
    MoodRequired,
    /// E003: Save attempted without mood, art, or sound
    IncompleteComposition,
    /// E004: Save attempted while placeholder art is displayed
    PlaceholderArt,
    /// E005: Display filter outside its slider range
    FilterOutOfRange,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::MoodTooShort => "E001",
            ErrorCode::MoodRequired => "E002",
            ErrorCode::IncompleteComposition => "E003",
            ErrorCode::PlaceholderArt => "E004",
            ErrorCode::FilterOutOfRange => "E005",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A user-facing validation error. No external call is made when one is
/// raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Message shown to the user as-is.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}
