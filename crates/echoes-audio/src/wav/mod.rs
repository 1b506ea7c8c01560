//! Deterministic WAV container encoding.
//!
//! PCM bytes are wrapped in the canonical 44-byte RIFF/WAVE header
//! (`RIFF` + `fmt ` + `data`) with every multi-byte field little-endian.
//! The payload is passed through untouched.

mod format;
mod info;
mod writer;


// Re-export public API
pub use format::{AudioFormat, DEFAULT_SAMPLE_RATE};
pub use info::{extract_pcm_data, WavInfo};
pub use writer::{encode, encode_data_uri, encode_to_vec, write_wav};

/// Size of the RIFF + fmt + data chunk headers written by [`write_wav`].
pub const WAV_HEADER_LEN: usize = 44;

/// Prefix of every sound data URI produced by [`encode_data_uri`].
pub const WAV_DATA_URI_PREFIX: &str = "data:audio/wav;base64,";
