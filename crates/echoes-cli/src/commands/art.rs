//! Art command implementation
//!
//! Generates abstract art for a mood.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use echoes_spec::{mime_essence, parse_data_uri, validate_art_mood};
use serde::{Deserialize, Serialize};

use super::json_output::{error_codes, CommandOutput, JsonError};
use super::{format_bytes, write_data_uri};
use crate::actions;
use crate::config::EchoesConfig;
use crate::context;

/// Result of the `art` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtOutput {
    /// The submitted mood
    pub mood: String,
    /// Image media type
    pub mime_type: String,
    /// Decoded image size in bytes
    pub bytes: usize,
    /// Where the image was written (if `--out` was given)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// The image as a data URI (if not written to a file)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub art_data_uri: Option<String>,
}

/// Run the art command
///
/// # Arguments
/// * `config` - Resolved configuration
/// * `mood` - The mood to visualize
/// * `out` - Optional path to write the decoded image to
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 on success, 1 on failure
pub fn run(
    config: &EchoesConfig,
    mood: &str,
    out: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    if let Err(err) = validate_art_mood(mood) {
        if json_output {
            return CommandOutput::<ArtOutput>::failure(vec![JsonError::new(
                err.code.code(),
                err.message,
            )])
            .emit();
        }
        anyhow::bail!(err.message);
    }

    if json_output {
        if let Err(err) = context::require_api_key(config) {
            return super::json_output::emit_error(error_codes::CONFIG, err.to_string());
        }
    } else {
        context::require_api_key(config)?;
        println!("{} {}", "Generating art for:".cyan().bold(), mood);
    }

    let model = context::open_model(config)?;
    let art = match actions::art_for_mood(&model, mood) {
        Ok(art) => art,
        Err(err) => {
            if json_output {
                return super::json_output::emit_error(error_codes::GENERATION, err.error);
            }
            println!("  {} {}", "!!".red(), err.error);
            return Ok(ExitCode::from(1));
        }
    };

    let output = match out {
        Some(path) => {
            let media = write_data_uri(&art.art_data_uri, Path::new(path))?;
            ArtOutput {
                mood: mood.to_string(),
                mime_type: mime_essence(&media.mime_type),
                bytes: media.data.len(),
                path: Some(path.to_string()),
                art_data_uri: None,
            }
        }
        None => {
            let (mime_type, bytes) = match parse_data_uri(&art.art_data_uri) {
                Ok(media) => (mime_essence(&media.mime_type), media.data.len()),
                Err(_) => ("unknown".to_string(), 0),
            };
            ArtOutput {
                mood: mood.to_string(),
                mime_type,
                bytes,
                path: None,
                art_data_uri: Some(art.art_data_uri),
            }
        }
    };

    if json_output {
        return CommandOutput::success(output).emit();
    }

    println!(
        "  {} {} ({})",
        "ok".green(),
        output.mime_type,
        format_bytes(output.bytes)
    );
    match (&output.path, &output.art_data_uri) {
        (Some(path), _) => println!("  {} {}", "->".green(), path),
        (None, Some(uri)) => println!("{}", uri),
        (None, None) => {}
    }
    Ok(ExitCode::SUCCESS)
}
