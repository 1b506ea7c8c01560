//! PCM format parameters.

use crate::error::EncodeError;

/// Default sample rate of the speech model output, in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

/// Format parameters describing interleaved PCM samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    /// Number of interleaved channels (1 = mono).
    pub channel_count: u16,
    /// Samples per second, per channel.
    pub sample_rate: u32,
    /// Bytes per sample, per channel (2 = 16-bit signed PCM).
    pub sample_width_bytes: u16,
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::mono(DEFAULT_SAMPLE_RATE)
    }
}

impl AudioFormat {
    /// Creates a format from explicit parameters. Not validated until encode.
    pub fn new(channel_count: u16, sample_rate: u32, sample_width_bytes: u16) -> Self {
        Self {
            channel_count,
            sample_rate,
            sample_width_bytes,
        }
    }

    /// Creates a 16-bit mono format.
    pub fn mono(sample_rate: u32) -> Self {
        Self::new(1, sample_rate, 2)
    }

    /// Bytes per sample frame (all channels).
    pub fn block_align(&self) -> u32 {
        self.channel_count as u32 * self.sample_width_bytes as u32
    }

    /// Bytes per second.
    pub fn byte_rate(&self) -> u64 {
        self.sample_rate as u64 * self.block_align() as u64
    }

    /// Bits per sample, per channel.
    pub fn bits_per_sample(&self) -> u32 {
        self.sample_width_bytes as u32 * 8
    }

    /// Checks that every parameter is positive and every derived header
    /// field fits its on-disk width.
    pub fn validate(&self) -> Result<(), EncodeError> {
        self.header_fields().map(|_| ())
    }

    pub(crate) fn header_fields(&self) -> Result<HeaderFields, EncodeError> {
        if self.channel_count == 0 {
            return Err(EncodeError::non_positive("channel_count"));
        }
        if self.sample_rate == 0 {
            return Err(EncodeError::non_positive("sample_rate"));
        }
        if self.sample_width_bytes == 0 {
            return Err(EncodeError::non_positive("sample_width_bytes"));
        }

        let bits_per_sample = u16::try_from(self.bits_per_sample())
            .map_err(|_| EncodeError::overflow("sample_width_bytes"))?;
        let block_align =
            u16::try_from(self.block_align()).map_err(|_| EncodeError::overflow("block_align"))?;
        let byte_rate =
            u32::try_from(self.byte_rate()).map_err(|_| EncodeError::overflow("byte_rate"))?;

        Ok(HeaderFields {
            channels: self.channel_count,
            sample_rate: self.sample_rate,
            byte_rate,
            block_align,
            bits_per_sample,
        })
    }
}

/// Validated `fmt ` chunk fields at their on-disk widths.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HeaderFields {
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
}
