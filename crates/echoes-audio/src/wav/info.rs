//! WAV header decoding and PCM extraction.

use crate::error::DecodeError;

use super::WAV_HEADER_LEN;

/// Information read back from a WAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavInfo {
    /// Audio format code (1 = PCM).
    pub audio_format: u16,
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Declared bytes per second.
    pub byte_rate: u32,
    /// Declared bytes per sample frame.
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Declared length of the data chunk.
    pub data_len: u32,
    /// Value of the RIFF size field.
    pub riff_size: u32,
}

impl WavInfo {
    /// Parses the RIFF/WAVE header of `data`.
    ///
    /// Chunks after the `WAVE` identifier are walked in order with word
    /// alignment; unknown chunks are skipped.
    pub fn parse(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < WAV_HEADER_LEN {
            return Err(DecodeError::TooShort(data.len()));
        }
        if &data[0..4] != b"RIFF" {
            return Err(DecodeError::BadIdentifier {
                expected: "RIFF",
                offset: 0,
            });
        }
        if &data[8..12] != b"WAVE" {
            return Err(DecodeError::BadIdentifier {
                expected: "WAVE",
                offset: 8,
            });
        }
        let riff_size = read_u32(data, 4);

        let mut fmt: Option<[u8; 16]> = None;
        let mut data_len = None;

        for chunk in Chunks::new(data) {
            match &chunk.id {
                b"fmt " => {
                    if chunk.size < 16 || chunk.body_start + 16 > data.len() {
                        return Err(DecodeError::Truncated {
                            chunk: "fmt ",
                            offset: chunk.offset,
                        });
                    }
                    let mut block = [0u8; 16];
                    block.copy_from_slice(&data[chunk.body_start..chunk.body_start + 16]);
                    fmt = Some(block);
                }
                b"data" => {
                    if fmt.is_none() {
                        return Err(DecodeError::MissingChunk("fmt "));
                    }
                    data_len = Some(chunk.size as u32);
                    break;
                }
                _ => {}
            }
        }

        let fmt = fmt.ok_or(DecodeError::MissingChunk("fmt "))?;
        let data_len = data_len.ok_or(DecodeError::MissingChunk("data"))?;

        Ok(Self {
            audio_format: read_u16(&fmt, 0),
            channels: read_u16(&fmt, 2),
            sample_rate: read_u32(&fmt, 4),
            byte_rate: read_u32(&fmt, 8),
            block_align: read_u16(&fmt, 12),
            bits_per_sample: read_u16(&fmt, 14),
            data_len,
            riff_size,
        })
    }

    /// Number of whole sample frames described by the header.
    pub fn frame_count(&self) -> u32 {
        if self.block_align == 0 {
            0
        } else {
            self.data_len / self.block_align as u32
        }
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.frame_count() as f64 / self.sample_rate as f64
        }
    }
}

/// Extracts the `data` chunk payload from a WAV buffer.
///
/// Returns `None` if the buffer is not a RIFF/WAVE container or the data
/// chunk runs past the end of the buffer.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < WAV_HEADER_LEN {
        return None;
    }
    if &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    Chunks::new(wav_data)
        .find(|chunk| &chunk.id == b"data")
        .and_then(|chunk| wav_data.get(chunk.body_start..chunk.body_start + chunk.size))
}

struct Chunk {
    id: [u8; 4],
    offset: usize,
    body_start: usize,
    size: usize,
}

/// Iterator over the chunk headers following the `WAVE` identifier.
struct Chunks<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Chunks<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 12 }
    }
}

impl Iterator for Chunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.pos + 8 > self.data.len() {
            return None;
        }
        let offset = self.pos;
        let mut id = [0u8; 4];
        id.copy_from_slice(&self.data[offset..offset + 4]);
        let size = read_u32(self.data, offset + 4) as usize;

        // Align to word boundary
        let padded = size + (size % 2);
        self.pos = offset.saturating_add(8).saturating_add(padded);

        Some(Chunk {
            id,
            offset,
            body_start: offset + 8,
            size,
        })
    }
}

fn read_u16(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}
