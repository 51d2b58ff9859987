//! Machine-readable output types for `--json`.

use serde::{Deserialize, Serialize};
use voxface_core::RecordingError;
use voxface_store::AssetHandle;

use crate::input::PcmSource;

/// Error entry in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonError {
    /// Error code (`REC_xxx`, or `CLI_001` for input problems).
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Code used for failures that happen before any recording operation.
pub const INPUT_ERROR: &str = "CLI_001";

impl JsonError {
    /// Creates a new error entry.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&RecordingError> for JsonError {
    fn from(err: &RecordingError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// Format details shared by the save reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSummary {
    /// Where the samples came from.
    pub source: PcmSource,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// PCM payload size in bytes.
    pub pcm_bytes: usize,
    /// BLAKE3 hash of the PCM payload.
    pub pcm_hash: String,
}

/// Output of `voxface save --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveOutput {
    /// Whether both files were committed.
    pub success: bool,
    /// Audio file path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    /// Face file path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face: Option<String>,
    /// Input audio details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_summary: Option<AudioSummary>,
    /// Number of face frames.
    pub frames: usize,
    /// Failure details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

/// Output of `voxface save-assets --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveAssetsOutput {
    /// Whether both assets were registered.
    pub success: bool,
    /// Registered audio asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<AssetHandle>,
    /// Registered face asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face: Option<AssetHandle>,
    /// Failure details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

/// Output of `voxface inspect --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InspectOutput {
    /// WAV file summary.
    Wav {
        /// Sample rate in Hz.
        sample_rate: u32,
        /// Channel count.
        channels: u16,
        /// Bytes per second.
        byte_rate: u32,
        /// Bytes per sample frame.
        block_align: u16,
        /// PCM payload size in bytes.
        pcm_bytes: usize,
        /// Duration in seconds.
        duration_seconds: f64,
        /// BLAKE3 hash of the PCM payload.
        pcm_hash: String,
    },
    /// Face document or face asset summary.
    Face {
        /// Whether the file is a registered face asset payload.
        asset: bool,
        /// Duration in seconds.
        duration: f32,
        /// Frames per second.
        frame_rate: f32,
        /// Number of frames.
        frames: usize,
        /// Lowest and highest frame index.
        #[serde(skip_serializing_if = "Option::is_none")]
        frame_index_range: Option<(u32, u32)>,
        /// Blendshape names in first-seen order.
        blend_shapes: Vec<String>,
    },
    /// Inspection failed.
    Error {
        /// Failure details.
        error: JsonError,
    },
}
