//! Inspect command implementation
//!
//! Decodes a WAV header and prints its fields. Accepts binary WAV files and
//! `data:audio/wav;base64,...` text files.

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use echoes_audio::{WavInfo, WAV_DATA_URI_PREFIX};
use echoes_spec::parse_data_uri;
use serde::{Deserialize, Serialize};

use super::json_output::{error_codes, CommandOutput, JsonError};

/// Result of the `inspect` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectOutput {
    /// Inspected file
    pub input: String,
    /// Audio format code (1 = PCM)
    pub audio_format: u16,
    /// Channel count
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Declared bytes per second
    pub byte_rate: u32,
    /// Declared bytes per frame
    pub block_align: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Declared data chunk length
    pub data_len: u32,
    /// RIFF chunk size field
    pub riff_size: u32,
    /// Playback length
    pub duration_seconds: f64,
}

impl InspectOutput {
    fn new(input: &str, info: &WavInfo) -> Self {
        Self {
            input: input.to_string(),
            audio_format: info.audio_format,
            channels: info.channels,
            sample_rate: info.sample_rate,
            byte_rate: info.byte_rate,
            block_align: info.block_align,
            bits_per_sample: info.bits_per_sample,
            data_len: info.data_len,
            riff_size: info.riff_size,
            duration_seconds: info.duration_seconds(),
        }
    }
}

/// Run the inspect command
pub fn run(input: &str, json_output: bool) -> Result<ExitCode> {
    let parsed = fs::read(input)
        .with_context(|| format!("Failed to read file: {}", input))
        .and_then(read_wav_bytes)
        .and_then(|wav| WavInfo::parse(&wav).context("Not a valid WAV file"));

    let info = match parsed {
        Ok(info) => info,
        Err(err) if json_output => {
            return CommandOutput::<InspectOutput>::failure(vec![JsonError::new(
                error_codes::WAV_DECODE,
                format!("{:#}", err),
            )
            .with_file(input)])
            .emit();
        }
        Err(err) => return Err(err),
    };

    let output = InspectOutput::new(input, &info);
    if json_output {
        return CommandOutput::success(output).emit();
    }

    println!("{} {}", "Inspecting:".cyan().bold(), input);
    println!("  {:<16} {}", "format", output.audio_format);
    println!("  {:<16} {}", "channels", output.channels);
    println!("  {:<16} {} Hz", "sample rate", output.sample_rate);
    println!("  {:<16} {}", "byte rate", output.byte_rate);
    println!("  {:<16} {}", "block align", output.block_align);
    println!("  {:<16} {}", "bits/sample", output.bits_per_sample);
    println!("  {:<16} {} bytes", "data", output.data_len);
    println!("  {:<16} {:.3}s", "duration", output.duration_seconds);
    if output.riff_size != output.data_len.saturating_add(36) {
        println!(
            "  {} RIFF size {} does not match a canonical 44-byte header",
            "!".yellow(),
            output.riff_size
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Returns WAV bytes, decoding a data URI text file if needed.
fn read_wav_bytes(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if !bytes.starts_with(b"data:") {
        return Ok(bytes);
    }
    let text = String::from_utf8(bytes).context("Data URI file is not UTF-8")?;
    let text = text.trim_end();
    if !text.starts_with(WAV_DATA_URI_PREFIX) {
        log::warn!("event=inspect status=non_wav_data_uri");
    }
    Ok(parse_data_uri(text)?.data)
}
