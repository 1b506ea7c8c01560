//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`; its stdout is then a single
//! [`CommandOutput`] document and nothing else.

use std::process::ExitCode;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::canvas::Notice;

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
/// Validation failures pass through their `E00X` codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// File could not be written
    pub const FILE_WRITE: &str = "CLI_002";
    /// Configuration could not be resolved
    pub const CONFIG: &str = "CLI_003";
    /// Art or soundscape generation failed
    pub const GENERATION: &str = "CLI_004";
    /// Composition could not be saved or deleted
    pub const PERSISTENCE: &str = "CLI_005";
    /// Composition not found
    pub const NOT_FOUND: &str = "CLI_006";
    /// Invalid audio format parameters
    pub const INVALID_FORMAT: &str = "CLI_007";
    /// Input is not a decodable WAV file
    pub const WAV_DECODE: &str = "CLI_008";
    /// Stored media is not a base64 data URI
    pub const DATA_URI: &str = "CLI_009";
    /// Local validation failed before any model call
    pub const VALIDATION: &str = "CLI_010";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// File path involved (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Envelope for every `--json` command output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutput<T> {
    /// Whether the command succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Notices raised by the canvas controller
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<Notice>,
    /// Command-specific result (on success, and on partial success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> CommandOutput<T> {
    /// Creates a successful output.
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            notices: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            notices: Vec::new(),
            result: None,
        }
    }

    /// Attaches the partial result of a failed command.
    pub fn with_result(mut self, result: T) -> Self {
        self.result = Some(result);
        self
    }

    /// Attaches controller notices.
    pub fn with_notices(mut self, notices: Vec<Notice>) -> Self {
        self.notices = notices;
        self
    }

    /// Prints the document to stdout and returns the matching exit code.
    pub fn emit(&self) -> Result<ExitCode> {
        let json = serde_json::to_string_pretty(self)?;
        println!("{}", json);
        Ok(exit_code(self.success))
    }
}

/// Prints a single-error failure document.
pub fn emit_error(code: &str, message: impl Into<String>) -> Result<ExitCode> {
    CommandOutput::<()>::failure(vec![JsonError::new(code, message)]).emit()
}

/// 0 on success, 1 on failure.
pub fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::NoticeKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_success_omits_empty_notices() {
        let value = serde_json::to_value(CommandOutput::success(42)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "success": true, "errors": [], "result": 42 })
        );
    }

    #[test]
    fn test_failure_with_file_and_notices() {
        let output = CommandOutput::<()>::failure(vec![
            JsonError::new(error_codes::FILE_READ, "Failed to read").with_file("in.pcm")
        ])
        .with_notices(vec![Notice {
            kind: NoticeKind::Error,
            title: "Cannot Save".to_string(),
            description: None,
        }]);
        let value = serde_json::to_value(output).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "success": false,
                "errors": [{ "code": "CLI_001", "message": "Failed to read", "file": "in.pcm" }],
                "notices": [{ "kind": "error", "title": "Cannot Save" }],
            })
        );
    }

    #[test]
    fn test_error_codes_are_unique() {
        let codes = [
            error_codes::FILE_READ,
            error_codes::FILE_WRITE,
            error_codes::CONFIG,
            error_codes::GENERATION,
            error_codes::PERSISTENCE,
            error_codes::NOT_FOUND,
            error_codes::INVALID_FORMAT,
            error_codes::WAV_DECODE,
            error_codes::DATA_URI,
            error_codes::VALIDATION,
        ];
        let mut sorted = codes.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
    }
}
