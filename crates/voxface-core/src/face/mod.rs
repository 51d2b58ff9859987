//! Face sequence document encoder.
//!
//! A face document is a JSON object with the sequence metadata and the
//! ordered frames:
//!
//! ```json
//! {
//!   "Duration": 1.0,
//!   "FrameRate": 30.0,
//!   "Frames": [
//!     { "FrameIndex": 0, "BlendShapes": { "JawOpen": 0.5 } }
//!   ]
//! }
//! ```
//!
//! Frame order and blendshape insertion order are preserved, so encoding the
//! same sequence twice yields identical text.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{RecordingError, RecordingResult};
use crate::model::{AnimationSequence, FaceAnimationAsset};


/// Whitespace layout of an encoded document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceLayout {
    /// Indented, one field per line.
    #[default]
    Pretty,
    /// No insignificant whitespace.
    Compact,
}

impl std::fmt::Display for FaceLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FaceLayout::Pretty => write!(f, "pretty"),
            FaceLayout::Compact => write!(f, "compact"),
        }
    }
}

fn check_finite(name: &str, value: f32) -> RecordingResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RecordingError::invalid_param(
            name,
            format!("{value} cannot be represented as a JSON number"),
        ))
    }
}

/// Checks that a sequence can be encoded.
///
/// JSON has no NaN or infinity, so non-finite numbers are rejected rather
/// than silently written as `null`.
pub fn validate_sequence(sequence: &AnimationSequence) -> RecordingResult<()> {
    if sequence.is_empty() {
        warn!("rejecting face sequence with no frames");
        return Err(RecordingError::EmptyInput {
            what: "face sequence",
        });
    }
    check_finite("Duration", sequence.duration)?;
    check_finite("FrameRate", sequence.frame_rate)?;
    for frame in &sequence.frames {
        for (name, weight) in &frame.blend_shapes {
            let field = format!("frame {} blendshape '{}'", frame.frame_index, name);
            check_finite(&field, *weight)?;
        }
    }
    Ok(())
}

fn to_text<T: Serialize>(value: &T, layout: FaceLayout) -> RecordingResult<String> {
    let text = match layout {
        FaceLayout::Pretty => serde_json::to_string_pretty(value)?,
        FaceLayout::Compact => serde_json::to_string(value)?,
    };
    Ok(text)
}

/// Encodes a sequence as a pretty-printed face document.
pub fn encode_face_sequence(sequence: &AnimationSequence) -> RecordingResult<String> {
    encode_face_sequence_with_layout(sequence, FaceLayout::default())
}

/// Encodes a sequence as a face document with the given layout.
pub fn encode_face_sequence_with_layout(
    sequence: &AnimationSequence,
    layout: FaceLayout,
) -> RecordingResult<String> {
    validate_sequence(sequence)?;
    to_text(sequence, layout)
}

/// Encodes the registry payload for a face animation asset.
///
/// The asset document nests the face document under `FaceSequence` next to
/// `Duration`, `FrameRate` and `NumFrames`.
pub fn encode_face_asset(
    sequence: &AnimationSequence,
    layout: FaceLayout,
) -> RecordingResult<String> {
    validate_sequence(sequence)?;
    to_text(&FaceAnimationAsset::from_sequence(sequence), layout)
}

/// Parses a face document.
pub fn decode_face_sequence(text: &str) -> RecordingResult<AnimationSequence> {
    Ok(serde_json::from_str(text)?)
}

/// Parses a face animation asset payload.
pub fn decode_face_asset(text: &str) -> RecordingResult<FaceAnimationAsset> {
    Ok(serde_json::from_str(text)?)
}
