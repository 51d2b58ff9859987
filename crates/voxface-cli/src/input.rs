//! Loading command inputs from disk.
//!
//! PCM input is either a raw `.pcm`/`.raw` dump of 16-bit little-endian
//! samples or a WAV file, detected by its RIFF magic rather than the
//! extension. Face input is a face document as written by `voxface save`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use voxface_core::{decode_face_sequence, decode_wav, AnimationSequence, WavFormat};
use voxface_store::RecordingConfig;

/// Where the PCM bytes came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PcmSource {
    /// Headerless sample dump.
    Raw,
    /// Payload of a WAV container.
    Wav,
}

impl PcmSource {
    /// Returns the string representation for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            PcmSource::Raw => "raw",
            PcmSource::Wav => "wav",
        }
    }
}

impl std::fmt::Display for PcmSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// PCM input and, for WAV input, the format from its header.
#[derive(Debug, Clone)]
pub struct LoadedPcm {
    /// Sample bytes.
    pub pcm: Vec<u8>,
    /// Format read from a WAV header.
    pub format: Option<WavFormat>,
    /// Input kind.
    pub source: PcmSource,
}

/// Returns true if `bytes` start like a RIFF/WAVE container.
pub fn looks_like_wav(bytes: &[u8]) -> bool {
    bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE"
}

/// Load PCM samples from a raw dump or a WAV file.
pub fn load_pcm(path: &Path) -> Result<LoadedPcm> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read PCM input: {}", path.display()))?;

    if looks_like_wav(&bytes) {
        let decoded = decode_wav(&bytes)
            .with_context(|| format!("Failed to decode WAV input: {}", path.display()))?;
        debug!(
            "{}: WAV input, {} Hz, {} channel(s)",
            path.display(),
            decoded.format.sample_rate(),
            decoded.format.channels()
        );
        Ok(LoadedPcm {
            pcm: decoded.pcm,
            format: Some(decoded.format),
            source: PcmSource::Wav,
        })
    } else {
        Ok(LoadedPcm {
            pcm: bytes,
            format: None,
            source: PcmSource::Raw,
        })
    }
}

/// Load a face document.
pub fn load_face_sequence(path: &Path) -> Result<AnimationSequence> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read face data: {}", path.display()))?;
    decode_face_sequence(&content)
        .with_context(|| format!("Failed to parse face data: {}", path.display()))
}

/// Load the config file, or the defaults when no path is given.
pub fn load_config(path: Option<&str>) -> Result<RecordingConfig> {
    match path {
        Some(path) => RecordingConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load config: {path}")),
        None => Ok(RecordingConfig::default()),
    }
}

/// Picks sample rate and channels: explicit flags, then the WAV header, then config.
pub fn resolve_format(
    loaded: &LoadedPcm,
    sample_rate: Option<u32>,
    channels: Option<u16>,
    config: &RecordingConfig,
) -> (u32, u16) {
    let header_rate = loaded.format.map(|f| f.sample_rate());
    let header_channels = loaded.format.map(|f| f.channels());
    (
        sample_rate.or(header_rate).unwrap_or(config.sample_rate),
        channels.or(header_channels).unwrap_or(config.channels),
    )
}
