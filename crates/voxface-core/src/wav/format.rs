//! WAV format parameters.

use crate::error::{RecordingError, RecordingResult};

/// Bits per sample. The encoder only produces 16-bit integer PCM.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Size of the canonical header in bytes.
pub const HEADER_LEN: usize = 44;

/// Validated WAV format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    channels: u16,
    sample_rate: u32,
}

impl WavFormat {
    /// Creates a format, rejecting zero channels or a zero sample rate.
    ///
    /// Also rejects combinations whose byte rate does not fit the 32-bit
    /// header field.
    pub fn new(sample_rate: u32, channels: u16) -> RecordingResult<Self> {
        if sample_rate == 0 {
            return Err(RecordingError::invalid_param(
                "sample_rate",
                "must be a positive number of Hz",
            ));
        }
        if channels == 0 {
            return Err(RecordingError::invalid_param(
                "channels",
                "must be at least one channel",
            ));
        }
        if channels.checked_mul(BITS_PER_SAMPLE / 8).is_none() {
            return Err(RecordingError::invalid_param(
                "channels",
                format!("{channels} channels overflow the block align field"),
            ));
        }
        let format = Self {
            channels,
            sample_rate,
        };
        if sample_rate.checked_mul(u32::from(format.block_align())).is_none() {
            return Err(RecordingError::invalid_param(
                "sample_rate",
                format!("{sample_rate} Hz x {channels} channels overflows the byte rate field"),
            ));
        }
        Ok(format)
    }

    /// Mono format.
    pub fn mono(sample_rate: u32) -> RecordingResult<Self> {
        Self::new(sample_rate, 1)
    }

    /// Stereo format.
    pub fn stereo(sample_rate: u32) -> RecordingResult<Self> {
        Self::new(sample_rate, 2)
    }

    /// Number of interleaved channels.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Always 16.
    pub fn bits_per_sample(&self) -> u16 {
        BITS_PER_SAMPLE
    }

    /// Bytes per sample frame (all channels).
    pub fn block_align(&self) -> u16 {
        self.channels * (BITS_PER_SAMPLE / 8)
    }

    /// Bytes per second.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.block_align())
    }

    /// Duration in seconds of `pcm_len` bytes of audio in this format.
    pub fn duration_seconds(&self, pcm_len: usize) -> f64 {
        pcm_len as f64 / f64::from(self.byte_rate())
    }
}
