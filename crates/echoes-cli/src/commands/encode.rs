//! Encode command implementation
//!
//! Wraps a raw PCM file in a WAV container.

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use echoes_audio::{encode_data_uri, encode_to_vec, AudioFormat};
use serde::{Deserialize, Serialize};

use super::format_bytes;
use super::json_output::{error_codes, CommandOutput, JsonError};

/// Options for the `encode` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// PCM sample layout
    pub format: AudioFormat,
    /// Write a `data:audio/wav;base64,...` text file instead of binary WAV
    pub data_uri: bool,
}

/// Result of the `encode` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeOutput {
    /// Input PCM file
    pub input: String,
    /// Written output file
    pub output: String,
    /// PCM payload size in bytes
    pub pcm_bytes: usize,
    /// Output file size in bytes
    pub output_bytes: usize,
    /// Whether the output is a data URI text file
    pub data_uri: bool,
    /// True if the payload is not a whole number of sample frames
    pub partial_frame: bool,
}

/// Run the encode command
///
/// # Returns
/// Exit code: 0 on success, 1 on invalid format parameters
pub fn run(
    input: &str,
    output: &str,
    options: &EncodeOptions,
    json_output: bool,
) -> Result<ExitCode> {
    let pcm = match fs::read(input) {
        Ok(pcm) => pcm,
        Err(e) if json_output => {
            return CommandOutput::<EncodeOutput>::failure(vec![JsonError::new(
                error_codes::FILE_READ,
                format!("Failed to read PCM file: {}", e),
            )
            .with_file(input)])
            .emit();
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read PCM file: {}", input));
        }
    };

    let encoded = if options.data_uri {
        encode_data_uri(&pcm, &options.format).map(String::into_bytes)
    } else {
        encode_to_vec(&pcm, &options.format)
    };
    let bytes = match encoded {
        Ok(bytes) => bytes,
        Err(err) if json_output => {
            let code = if err.is_invalid_format() {
                error_codes::INVALID_FORMAT
            } else {
                error_codes::FILE_WRITE
            };
            return CommandOutput::<EncodeOutput>::failure(vec![JsonError::new(
                code,
                err.to_string(),
            )])
            .emit();
        }
        Err(err) => return Err(err.into()),
    };

    fs::write(output, &bytes).with_context(|| format!("Failed to write file: {}", output))?;

    let block_align = options.format.block_align() as usize;
    let result = EncodeOutput {
        input: input.to_string(),
        output: output.to_string(),
        pcm_bytes: pcm.len(),
        output_bytes: bytes.len(),
        data_uri: options.data_uri,
        partial_frame: block_align > 0 && pcm.len() % block_align != 0,
    };

    if json_output {
        return CommandOutput::success(result).emit();
    }

    println!(
        "{} {} -> {} ({})",
        "Encoded:".cyan().bold(),
        result.input,
        result.output,
        format_bytes(result.output_bytes)
    );
    println!(
        "  {} {} ch, {} Hz, {}-bit",
        "->".green(),
        options.format.channel_count,
        options.format.sample_rate,
        options.format.bits_per_sample()
    );
    if result.partial_frame {
        println!(
            "  {} payload is not a multiple of the {}-byte frame size",
            "!".yellow(),
            block_align
        );
    }
    Ok(ExitCode::SUCCESS)
}
