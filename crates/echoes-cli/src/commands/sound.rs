//! Sound command implementation
//!
//! Generates an ambient soundscape for a mood and packages it as WAV.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use echoes_audio::WavInfo;
use echoes_spec::{parse_data_uri, validate_sound_mood};
use serde::{Deserialize, Serialize};

use super::json_output::{emit_error, error_codes, CommandOutput, JsonError};
use super::{format_bytes, write_data_uri};
use crate::actions;
use crate::config::EchoesConfig;
use crate::context;

/// Result of the `sound` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundOutput {
    /// The submitted mood
    pub mood: String,
    /// WAV sample rate in Hz
    pub sample_rate: u32,
    /// Channel count
    pub channels: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Playback length
    pub duration_seconds: f64,
    /// WAV container size in bytes
    pub bytes: usize,
    /// Where the WAV was written (if `--out` was given)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// The WAV as a data URI (if not written to a file)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound_data_uri: Option<String>,
}

/// Run the sound command
///
/// # Returns
/// Exit code: 0 on success, 1 on failure
pub fn run(
    config: &EchoesConfig,
    mood: &str,
    out: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    if let Err(err) = validate_sound_mood(mood) {
        if json_output {
            return CommandOutput::<SoundOutput>::failure(vec![JsonError::new(
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
        println!("{} {}", "Generating soundscape for:".cyan().bold(), mood);
    }

    let model = context::open_model(config)?;
    let sound = match actions::sound_for_mood(&model, mood, &config.voice_name) {
        Ok(sound) => sound,
        Err(err) => {
            if json_output {
                return emit_error(error_codes::GENERATION, err.error);
            }
            println!("  {} {}", "!!".red(), err.error);
            return Ok(ExitCode::from(1));
        }
    };

    let wav = match out {
        Some(path) => write_data_uri(&sound.sound_data_uri, Path::new(path))?.data,
        None => parse_data_uri(&sound.sound_data_uri)?.data,
    };
    let info = WavInfo::parse(&wav).context("Generated soundscape is not a valid WAV")?;

    let output = SoundOutput {
        mood: mood.to_string(),
        sample_rate: info.sample_rate,
        channels: info.channels,
        bits_per_sample: info.bits_per_sample,
        duration_seconds: info.duration_seconds(),
        bytes: wav.len(),
        path: out.map(str::to_string),
        sound_data_uri: out.is_none().then_some(sound.sound_data_uri),
    };

    if json_output {
        return CommandOutput::success(output).emit();
    }

    println!(
        "  {} {} Hz, {} ch, {}-bit, {:.2}s ({})",
        "ok".green(),
        output.sample_rate,
        output.channels,
        output.bits_per_sample,
        output.duration_seconds,
        format_bytes(output.bytes)
    );
    match (&output.path, &output.sound_data_uri) {
        (Some(path), _) => println!("  {} {}", "->".green(), path),
        (None, Some(uri)) => println!("{}", uri),
        (None, None) => {}
    }
    Ok(ExitCode::SUCCESS)
}
