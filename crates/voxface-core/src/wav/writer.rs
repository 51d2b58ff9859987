//! Canonical WAV container encoding.

use std::io::Write;

use log::warn;

use super::format::{WavFormat, HEADER_LEN};
use crate::error::{RecordingError, RecordingResult};

/// Header bytes after the RIFF size field: "WAVE" + fmt chunk + data chunk header.
const RIFF_OVERHEAD: u32 = 36;

/// Checks that `pcm` is non-empty, frame aligned and fits the 32-bit size fields.
pub fn validate_pcm(pcm: &[u8], format: &WavFormat) -> RecordingResult<u32> {
    if pcm.is_empty() {
        warn!("rejecting empty PCM buffer");
        return Err(RecordingError::EmptyInput { what: "pcm" });
    }
    let block_align = usize::from(format.block_align());
    if pcm.len() % block_align != 0 {
        return Err(RecordingError::invalid_param(
            "pcm",
            format!(
                "length {} is not a multiple of the {}-byte sample frame for {} channel(s)",
                pcm.len(),
                block_align,
                format.channels()
            ),
        ));
    }
    u32::try_from(pcm.len())
        .ok()
        .filter(|len| len.checked_add(RIFF_OVERHEAD).is_some())
        .ok_or_else(|| {
            RecordingError::invalid_param(
                "pcm",
                format!("{} bytes exceed the 32-bit RIFF size field", pcm.len()),
            )
        })
}

/// Writes a complete WAV container to `writer`.
///
/// The PCM payload is validated first, so nothing is written for rejected
/// input.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm: &[u8]) -> RecordingResult<()> {
    let data_size = validate_pcm(pcm, format)?;

    writer.write_all(b"RIFF")?;
    writer.write_all(&(data_size + RIFF_OVERHEAD).to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?; // integer PCM
    writer.write_all(&format.channels().to_le_bytes())?;
    writer.write_all(&format.sample_rate().to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample().to_le_bytes())?;

    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm)?;

    Ok(())
}

/// Encodes 16-bit little-endian PCM into a WAV byte vector.
///
/// # Arguments
/// * `pcm` - Interleaved signed 16-bit little-endian samples
/// * `sample_rate` - Sample rate in Hz
/// * `channels` - Number of interleaved channels
pub fn encode_wav(pcm: &[u8], sample_rate: u32, channels: u16) -> RecordingResult<Vec<u8>> {
    let format = WavFormat::new(sample_rate, channels)?;
    encode_wav_with_format(pcm, &format)
}

/// Encodes PCM with an already validated format.
pub fn encode_wav_with_format(pcm: &[u8], format: &WavFormat) -> RecordingResult<Vec<u8>> {
    let mut buffer = Vec::with_capacity(HEADER_LEN + pcm.len());
    write_wav(&mut buffer, format, pcm)?;
    Ok(buffer)
}
