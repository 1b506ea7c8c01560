//! Compose command implementation
//!
//! Runs the full canvas flow: submit a mood, cycle a soundscape, adjust the
//! display filters, and optionally save the composition.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use echoes_spec::{validate_art_mood, Composition};
use echoes_store::CompositionRepository;
use serde::{Deserialize, Serialize};

use super::json_output::{emit_error, error_codes, CommandOutput, JsonError};
use crate::canvas::{Canvas, Notice, NoticeKind, SaveError};
use crate::config::EchoesConfig;
use crate::context;
use crate::model::GenerativeModel;

/// Options for the `compose` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Skip soundscape generation
    pub no_sound: bool,
    /// Save the composition to the library
    pub save: bool,
    /// Complexity (contrast) filter, `0..=200`
    pub complexity: Option<u16>,
    /// Color intensity (saturation) filter, `0..=200`
    pub intensity: Option<u16>,
}

/// Result of the `compose` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeOutput {
    /// The submitted mood
    pub mood: String,
    /// Displayed art (data URI, or the placeholder URL on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub art_data_uri: Option<String>,
    /// Current soundscape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound_data_uri: Option<String>,
    /// CSS filter applied over the art
    pub filter: String,
    /// The saved composition, if `--save` succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<Composition>,
}

/// Run the compose command
///
/// # Returns
/// Exit code: 0 if every requested step succeeded, 1 otherwise
pub fn run(
    config: &EchoesConfig,
    mood: &str,
    options: &ComposeOptions,
    json_output: bool,
) -> Result<ExitCode> {
    if let Err(err) = validate_art_mood(mood) {
        if json_output {
            return CommandOutput::<ComposeOutput>::failure(vec![JsonError::new(
                err.code.code(),
                err.message,
            )])
            .emit();
        }
        anyhow::bail!(err.message);
    }
    if json_output {
        if let Err(err) = context::require_api_key(config) {
            return emit_error(error_codes::CONFIG, err.to_string());
        }
    } else {
        context::require_api_key(config)?;
        println!("{} {}", "Composing:".cyan().bold(), mood);
    }

    let mut canvas = context::open_canvas(config)?;
    let (output, errors) = compose(&mut canvas, mood, options);
    let notices = canvas.take_notices();

    if json_output {
        let doc = if errors.is_empty() {
            CommandOutput::success(output)
        } else {
            CommandOutput::failure(errors).with_result(output)
        };
        return doc.with_notices(notices).emit();
    }

    print_notices(&notices);
    println!("{} {}", "Filter:".dimmed(), output.filter);
    if let Some(saved) = &output.saved {
        println!("{} {}", "Saved as:".dimmed(), saved.id);
    }
    Ok(super::json_output::exit_code(errors.is_empty()))
}

/// Drives `canvas` through the compose flow, collecting per-step errors.
pub fn compose<M, R>(
    canvas: &mut Canvas<M, R>,
    mood: &str,
    options: &ComposeOptions,
) -> (ComposeOutput, Vec<JsonError>)
where
    M: GenerativeModel,
    R: CompositionRepository,
{
    let mut errors = Vec::new();

    let art_ok = match canvas.submit_mood(mood) {
        Ok(_) => true,
        Err(err) => {
            errors.push(JsonError::new(error_codes::GENERATION, err.error));
            false
        }
    };

    if art_ok && !options.no_sound {
        if let Err(err) = canvas.cycle_soundscape() {
            errors.push(JsonError::new(error_codes::GENERATION, err.error));
        }
    }

    if art_ok && (options.complexity.is_some() || options.intensity.is_some()) {
        let current = canvas.filters();
        let complexity = options.complexity.unwrap_or(current.complexity);
        let intensity = options.intensity.unwrap_or(current.intensity);
        if let Err(err) = canvas.adjust_filters(complexity, intensity) {
            errors.push(JsonError::new(error_codes::VALIDATION, err.error));
        }
    }

    let mut saved = None;
    if options.save && errors.is_empty() {
        match canvas.save_composition() {
            Ok(composition) => saved = Some(composition),
            Err(err) => {
                let code = match &err {
                    SaveError::Invalid(_) => error_codes::VALIDATION,
                    SaveError::Store(_) => error_codes::PERSISTENCE,
                };
                errors.push(JsonError::new(code, err.message()));
            }
        }
    }

    let output = ComposeOutput {
        mood: canvas.mood().to_string(),
        art_data_uri: canvas.art().map(str::to_string),
        sound_data_uri: canvas.sound().map(str::to_string),
        filter: canvas.filters().css_filter(),
        saved,
    };
    (output, errors)
}

pub(crate) fn print_notices(notices: &[Notice]) {
    for notice in notices {
        let marker = match notice.kind {
            NoticeKind::Success => "ok".green(),
            NoticeKind::Error => "!!".red(),
        };
        match &notice.description {
            Some(description) => println!("  {} {}: {}", marker, notice.title.bold(), description),
            None => println!("  {} {}", marker, notice.title.bold()),
        }
    }
}
