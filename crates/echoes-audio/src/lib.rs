//! Emotional Echoes Audio Packaging
//!
//! This crate turns raw PCM bytes returned by a speech/audio model into a
//! playable RIFF/WAVE container, and encodes that container as base64 so it
//! can be embedded in a `data:audio/wav;base64,...` URI.
//!
//! # Determinism
//!
//! Encoding is a pure function of its inputs. The header carries no
//! timestamps or variable metadata, so identical PCM and format parameters
//! always produce byte-identical output.
//!
//! # Example
//!
//! ```
//! use echoes_audio::{encode, AudioFormat};
//!
//! let pcm = [0x00u8, 0x01, 0x02, 0x03];
//! let b64 = encode(&pcm, &AudioFormat::default()).unwrap();
//! assert!(b64.starts_with("UklGR")); // "RIFF"
//! ```
//!
//! # Crate Structure
//!
//! - [`wav`]: format parameters, container writer, header decoding
//! - [`error`]: encode and decode error types

pub mod error;
pub mod wav;

pub use error::{DecodeError, EncodeError};
pub use wav::{
    encode, encode_data_uri, encode_to_vec, extract_pcm_data, write_wav, AudioFormat, WavInfo,
    DEFAULT_SAMPLE_RATE, WAV_DATA_URI_PREFIX, WAV_HEADER_LEN,
};
