//! WAV container parsing, PCM extraction and hashing.

use super::format::{WavFormat, BITS_PER_SAMPLE};
use crate::error::{RecordingError, RecordingResult};

/// A decoded WAV container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedWav {
    /// Format from the `fmt ` chunk.
    pub format: WavFormat,
    /// Payload of the `data` chunk.
    pub pcm: Vec<u8>,
}

/// Iterator over the `(id, body)` chunks following the RIFF/WAVE header.
///
/// Stops at the first truncated chunk.
struct RiffChunks<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> RiffChunks<'a> {
    fn new(wav_data: &'a [u8]) -> Option<Self> {
        if wav_data.len() < 12 || &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
            return None;
        }
        Some(Self {
            data: wav_data,
            pos: 12,
        })
    }
}

impl<'a> Iterator for RiffChunks<'a> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let header = self.data.get(self.pos..self.pos + 8)?;
        let size = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
        let start = self.pos + 8;
        let body = self.data.get(start..start.checked_add(size)?)?;
        // chunks are word aligned
        self.pos = start + size + (size & 1);
        Some((&header[0..4], body))
    }
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Parses a 16-bit integer PCM WAV container.
///
/// Payloads that [`encode_wav`](super::encode_wav) would refuse are rejected
/// too: the data chunk must be non-empty and hold whole sample frames.
pub fn decode_wav(wav_data: &[u8]) -> RecordingResult<DecodedWav> {
    let chunks = RiffChunks::new(wav_data)
        .ok_or_else(|| RecordingError::invalid_wav("missing RIFF/WAVE header"))?;

    let mut format = None;
    for (id, body) in chunks {
        match id {
            b"fmt " => {
                if body.len() < 16 {
                    return Err(RecordingError::invalid_wav(format!(
                        "fmt chunk is {} bytes, expected at least 16",
                        body.len()
                    )));
                }
                let audio_format = read_u16(body, 0);
                let channels = read_u16(body, 2);
                let sample_rate = read_u32(body, 4);
                let bits = read_u16(body, 14);
                if audio_format != 1 {
                    return Err(RecordingError::invalid_wav(format!(
                        "audio format {audio_format} is not integer PCM"
                    )));
                }
                if bits != BITS_PER_SAMPLE {
                    return Err(RecordingError::invalid_wav(format!(
                        "{bits} bits per sample, expected {BITS_PER_SAMPLE}"
                    )));
                }
                let parsed = WavFormat::new(sample_rate, channels)
                    .map_err(|e| RecordingError::invalid_wav(e.to_string()))?;
                if read_u32(body, 8) != parsed.byte_rate()
                    || read_u16(body, 12) != parsed.block_align()
                {
                    return Err(RecordingError::invalid_wav(
                        "byte rate or block align disagree with channel count",
                    ));
                }
                format = Some(parsed);
            }
            b"data" => {
                let format = format
                    .ok_or_else(|| RecordingError::invalid_wav("data chunk before fmt chunk"))?;
                if body.is_empty() {
                    return Err(RecordingError::invalid_wav("data chunk is empty"));
                }
                let block_align = usize::from(format.block_align());
                if body.len() % block_align != 0 {
                    return Err(RecordingError::invalid_wav(format!(
                        "data chunk is {} bytes, not a whole number of {}-byte sample frames",
                        body.len(),
                        block_align
                    )));
                }
                return Ok(DecodedWav {
                    format,
                    pcm: body.to_vec(),
                });
            }
            _ => {}
        }
    }

    Err(RecordingError::invalid_wav("no complete data chunk"))
}

/// Extracts the `data` payload from a WAV buffer without validating the format.
///
/// Returns `None` if there is no RIFF header or no complete data chunk.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    RiffChunks::new(wav_data)?
        .find(|(id, _)| *id == b"data")
        .map(|(_, body)| body)
}

/// BLAKE3 hash of raw PCM bytes, as a hex string.
pub fn pcm_hash(pcm: &[u8]) -> String {
    blake3::hash(pcm).to_hex().to_string()
}

/// BLAKE3 hash of the PCM payload of a WAV buffer.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(pcm_hash)
}
