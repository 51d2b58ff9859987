//! Recording data model.
//!
//! The serialized field names of these types are the face document format:
//! `Duration`, `FrameRate`, `Frames`, `FrameIndex` and `BlendShapes`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One frame of facial animation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnimationFrame {
    /// Position of the frame within its sequence.
    pub frame_index: u32,
    /// Blendshape weights keyed by blendshape name, in insertion order.
    #[serde(default)]
    pub blend_shapes: IndexMap<String, f32>,
}

impl AnimationFrame {
    /// Creates a frame with no blendshapes.
    pub fn new(frame_index: u32) -> Self {
        Self {
            frame_index,
            blend_shapes: IndexMap::new(),
        }
    }

    /// Adds a blendshape weight, replacing any previous weight for `name`.
    pub fn with_blend_shape(mut self, name: impl Into<String>, weight: f32) -> Self {
        self.set_blend_shape(name, weight);
        self
    }

    /// Sets a blendshape weight in place.
    ///
    /// Replacing an existing key keeps its original position.
    pub fn set_blend_shape(&mut self, name: impl Into<String>, weight: f32) {
        self.blend_shapes.insert(name.into(), weight);
    }
}

/// A timed sequence of animation frames.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnimationSequence {
    /// Duration in seconds.
    pub duration: f32,
    /// Frames per second.
    pub frame_rate: f32,
    /// Frames in playback order.
    #[serde(default)]
    pub frames: Vec<AnimationFrame>,
}

impl AnimationSequence {
    /// Creates an empty sequence.
    pub fn new(duration: f32, frame_rate: f32) -> Self {
        Self {
            duration,
            frame_rate,
            frames: Vec::new(),
        }
    }

    /// Appends a frame.
    pub fn push_frame(&mut self, frame: AnimationFrame) {
        self.frames.push(frame);
    }

    /// Appends a frame, builder style.
    pub fn with_frame(mut self, frame: AnimationFrame) -> Self {
        self.frames.push(frame);
        self
    }

    /// Number of frames. Not required to match `duration * frame_rate`.
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if the sequence has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Face data as registered in an asset registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FaceAnimationAsset {
    /// The full sequence.
    pub face_sequence: AnimationSequence,
    /// Copy of the sequence duration.
    pub duration: f32,
    /// Copy of the sequence frame rate.
    pub frame_rate: f32,
    /// Number of frames in the sequence.
    pub num_frames: u32,
}

impl FaceAnimationAsset {
    /// Builds the asset payload for a sequence.
    pub fn from_sequence(sequence: &AnimationSequence) -> Self {
        Self {
            face_sequence: sequence.clone(),
            duration: sequence.duration,
            frame_rate: sequence.frame_rate,
            num_frames: u32::try_from(sequence.num_frames()).unwrap_or(u32::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_blend_shape_keeps_position() {
        let mut frame = AnimationFrame::new(0)
            .with_blend_shape("JawOpen", 0.1)
            .with_blend_shape("MouthSmile_L", 0.2);
        frame.set_blend_shape("JawOpen", 0.9);

        let keys: Vec<_> = frame.blend_shapes.keys().cloned().collect();
        assert_eq!(keys, vec!["JawOpen", "MouthSmile_L"]);
        assert_eq!(frame.blend_shapes["JawOpen"], 0.9);
    }

    #[test]
    fn test_sequence_frame_count_is_informational() {
        let sequence = AnimationSequence::new(10.0, 30.0)
            .with_frame(AnimationFrame::new(0))
            .with_frame(AnimationFrame::new(1));
        assert_eq!(sequence.num_frames(), 2);
        assert!(!sequence.is_empty());
    }

    #[test]
    fn test_face_asset_copies_metadata() {
        let sequence = AnimationSequence::new(2.5, 60.0).with_frame(AnimationFrame::new(0));
        let asset = FaceAnimationAsset::from_sequence(&sequence);
        assert_eq!(asset.duration, 2.5);
        assert_eq!(asset.frame_rate, 60.0);
        assert_eq!(asset.num_frames, 1);
        assert_eq!(asset.face_sequence, sequence);
    }
}
