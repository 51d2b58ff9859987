//! Paired audio / face commits.
//!
//! Both variants encode first, then commit audio, then commit face data.
//! When the face commit fails the audio artifact is removed again, so a
//! caller either gets both artifacts or neither.

mod assets;
mod files;


use serde::{Deserialize, Serialize};

pub use assets::{
    save_audio_and_face_as_assets, save_audio_as_sound_wave_asset, save_face_data_as_asset,
};
pub use files::{
    audio_path, face_path, save_audio_and_face, save_audio_and_face_with_layout,
    save_audio_to_wav_file, save_face_data_to_json_file,
};

/// References to a committed audio / face pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPair<T> {
    /// The committed audio artifact.
    pub audio: T,
    /// The committed face artifact.
    pub face: T,
}
