//! Core WAV writing and base64 packaging.

use std::io::Write;

use base64::Engine as _;

use super::format::AudioFormat;
use super::{WAV_DATA_URI_PREFIX, WAV_HEADER_LEN};
use crate::error::EncodeError;

/// Writes a complete WAV container to a writer.
///
/// The payload length is written as-is. A payload that is not a whole
/// number of sample frames still yields a header describing its true size.
///
/// # Arguments
/// * `writer` - Output writer
/// * `format` - PCM format parameters
/// * `pcm_data` - Raw interleaved PCM samples as bytes
pub fn write_wav<W: Write>(
    writer: &mut W,
    format: &AudioFormat,
    pcm_data: &[u8],
) -> Result<(), EncodeError> {
    let fields = format.header_fields()?;
    let data_size = u32::try_from(pcm_data.len())
        .ok()
        .filter(|size| size.checked_add(36).is_some())
        .ok_or(EncodeError::PayloadTooLarge(pcm_data.len()))?;
    let chunk_size = 36 + data_size; // Total size minus the 8-byte RIFF header

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&chunk_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // Chunk size (16 for PCM)
    writer.write_all(&1u16.to_le_bytes())?; // Audio format (1 = PCM)
    writer.write_all(&fields.channels.to_le_bytes())?;
    writer.write_all(&fields.sample_rate.to_le_bytes())?;
    writer.write_all(&fields.byte_rate.to_le_bytes())?;
    writer.write_all(&fields.block_align.to_le_bytes())?;
    writer.write_all(&fields.bits_per_sample.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Encodes PCM into WAV container bytes.
pub fn encode_to_vec(pcm_data: &[u8], format: &AudioFormat) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Vec::with_capacity(WAV_HEADER_LEN + pcm_data.len());
    write_wav(&mut buffer, format, pcm_data)?;
    Ok(buffer)
}

/// Encodes PCM into a WAV container and returns it as standard base64.
///
/// # Example
/// ```
/// use echoes_audio::{encode, AudioFormat};
///
/// let b64 = encode(&[0x00, 0x01, 0x02, 0x03], &AudioFormat::mono(24_000)).unwrap();
/// assert_eq!(b64, "UklGRigAAABXQVZFZm10IBAAAAABAAEAwF0AAIC7AAACABAAZGF0YQQAAAAAAQID");
/// ```
pub fn encode(pcm_data: &[u8], format: &AudioFormat) -> Result<String, EncodeError> {
    let wav = encode_to_vec(pcm_data, format)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(wav))
}

/// Encodes PCM into a `data:audio/wav;base64,...` URI.
pub fn encode_data_uri(pcm_data: &[u8], format: &AudioFormat) -> Result<String, EncodeError> {
    let b64 = encode(pcm_data, format)?;
    Ok(format!("{WAV_DATA_URI_PREFIX}{b64}"))
}
