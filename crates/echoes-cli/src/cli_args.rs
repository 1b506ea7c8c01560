//! CLI argument definitions for the `echoes` command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use echoes_audio::DEFAULT_SAMPLE_RATE;
use echoes_spec::MAX_FILTER_VALUE;

/// Emotional Echoes - mood-driven art and soundscapes
#[derive(Parser)]
#[command(name = "echoes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Path to a JSON config file (default: the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the saved composition library
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Generate abstract art for a mood
    Art {
        /// The mood to visualize
        #[arg(short, long)]
        mood: String,

        /// Write the image to this file instead of printing the data URI
        #[arg(short, long)]
        out: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Generate a soundscape for a mood
    Sound {
        /// The mood to sonify
        #[arg(short, long)]
        mood: String,

        /// Write the WAV to this file instead of printing the data URI
        #[arg(short, long)]
        out: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Generate art and a soundscape for a mood on the canvas
    Compose {
        /// The mood to express
        #[arg(short, long)]
        mood: String,

        /// Generate art only
        #[arg(long)]
        no_sound: bool,

        /// Save the result to the library
        #[arg(long)]
        save: bool,

        /// Complexity (contrast) filter, 0-200
        #[arg(long, value_parser = clap::value_parser!(u16).range(0..=MAX_FILTER_VALUE as i64))]
        complexity: Option<u16>,

        /// Color intensity (saturation) filter, 0-200
        #[arg(long, value_parser = clap::value_parser!(u16).range(0..=MAX_FILTER_VALUE as i64))]
        intensity: Option<u16>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List saved compositions
    List {
        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Write a saved composition's art and soundscape to disk
    Export {
        /// Composition id
        #[arg(long)]
        id: String,

        /// Output directory
        #[arg(long, default_value = ".")]
        out_dir: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Delete a saved composition
    Delete {
        /// Composition id
        #[arg(long)]
        id: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Wrap raw PCM samples in a WAV container
    Encode {
        /// Raw little-endian PCM input file
        #[arg(short, long)]
        input: String,

        /// Output file
        #[arg(short, long)]
        output: String,

        /// Interleaved channel count
        #[arg(long, default_value_t = 1)]
        channels: u16,

        /// Sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        rate: u32,

        /// Bytes per sample
        #[arg(long, default_value_t = 2)]
        width: u16,

        /// Write a data URI text file instead of binary WAV
        #[arg(long)]
        data_uri: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the header fields of a WAV file or WAV data URI file
    Inspect {
        /// WAV or data URI file
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}
