//! voxface store
//!
//! Commits encoded recordings through two collaborator interfaces:
//! - [`sink::FileSink`] - files on disk (`base.wav` + `base.json`)
//! - [`registry::AssetRegistry`] - named assets (`{base}_Audio` + `{base}_Face`)
//!
//! The [`orchestrator`] functions treat the audio / face pair as a unit: if
//! the face artifact cannot be committed, the audio artifact is removed
//! again before the error is returned.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use voxface_core::{AnimationFrame, AnimationSequence};
//! use voxface_store::{save_audio_and_face, FsSink};
//!
//! let pcm = vec![0u8; 3200];
//! let sequence = AnimationSequence::new(0.1, 30.0)
//!     .with_frame(AnimationFrame::new(0).with_blend_shape("JawOpen", 0.5));
//! let saved = save_audio_and_face(
//!     &pcm,
//!     &sequence,
//!     Path::new("recordings/greeting"),
//!     16000,
//!     1,
//!     &mut FsSink::new(),
//! )?;
//! println!("{} / {}", saved.audio.display(), saved.face.display());
//! # Ok::<(), voxface_core::RecordingError>(())
//! ```

pub mod config;
pub mod orchestrator;
pub mod registry;
pub mod sink;

pub use config::RecordingConfig;
pub use orchestrator::{
    save_audio_and_face, save_audio_and_face_as_assets, save_audio_and_face_with_layout,
    SavedPair,
};
pub use registry::{AssetHandle, AssetKind, AssetRegistry, DirectoryRegistry, MemoryRegistry};
pub use sink::{FileSink, FsSink, MemorySink};
