//! Asset variant: `{base}_Audio` + `{base}_Face` through an [`AssetRegistry`].

use log::{error, info, warn};
use voxface_core::{
    encode_face_asset, encode_wav, AnimationSequence, FaceLayout, RecordingError, RecordingResult,
};

use super::SavedPair;
use crate::config::RecordingConfig;
use crate::registry::{AssetHandle, AssetKind, AssetRegistry};

/// Encodes PCM as WAV and registers it as a sound wave asset.
pub fn save_audio_as_sound_wave_asset<R: AssetRegistry + ?Sized>(
    pcm: &[u8],
    asset_name: &str,
    sample_rate: u32,
    channels: u16,
    registry: &mut R,
) -> RecordingResult<AssetHandle> {
    let wav = encode_wav(pcm, sample_rate, channels)?;
    info!("registering sound wave asset {}", asset_name);
    registry.register_asset(asset_name, AssetKind::SoundWave, &wav)
}

/// Registers a face sequence as a face animation asset.
pub fn save_face_data_as_asset<R: AssetRegistry + ?Sized>(
    sequence: &AnimationSequence,
    asset_name: &str,
    layout: FaceLayout,
    registry: &mut R,
) -> RecordingResult<AssetHandle> {
    let payload = encode_face_asset(sequence, layout)?;
    info!(
        "registering face animation asset {} ({} frames)",
        asset_name,
        sequence.num_frames()
    );
    registry.register_asset(asset_name, AssetKind::FaceAnimation, payload.as_bytes())
}

/// Registers the audio and face assets for `base_name` as a pair.
///
/// Asset names come from the suffixes in `config`. If the face asset cannot
/// be registered the audio asset is discarded and
/// [`RecordingError::PartialCommit`] is returned.
pub fn save_audio_and_face_as_assets<R: AssetRegistry + ?Sized>(
    pcm: &[u8],
    sequence: &AnimationSequence,
    base_name: &str,
    sample_rate: u32,
    channels: u16,
    config: &RecordingConfig,
    registry: &mut R,
) -> RecordingResult<SavedPair<AssetHandle>> {
    info!("saving audio and face assets with base name {}", base_name);

    let wav = encode_wav(pcm, sample_rate, channels)?;
    let face_payload = encode_face_asset(sequence, config.face_layout)?;

    let audio_name = config.audio_asset_name(base_name);
    let face_name = config.face_asset_name(base_name);

    let audio = match registry.register_asset(&audio_name, AssetKind::SoundWave, &wav) {
        Ok(handle) => handle,
        Err(e) => {
            error!("failed to save audio asset {}: {}", audio_name, e);
            return Err(e);
        }
    };

    let face = match registry.register_asset(
        &face_name,
        AssetKind::FaceAnimation,
        face_payload.as_bytes(),
    ) {
        Ok(handle) => handle,
        Err(source) => {
            error!("failed to save face animation asset {}: {}", face_name, source);
            let rolled_back = match registry.discard_asset(&audio) {
                Ok(true) => true,
                Ok(false) => {
                    warn!("audio asset {} was already gone", audio.object_path);
                    true
                }
                Err(e) => {
                    error!("failed to discard audio asset {}: {}", audio.object_path, e);
                    false
                }
            };
            return Err(RecordingError::PartialCommit {
                committed: audio.name,
                failed: face_name,
                rolled_back,
                source: Box::new(source),
            });
        }
    };

    info!(
        "saved audio asset {} and face animation asset {}",
        audio.object_path, face.object_path
    );
    Ok(SavedPair { audio, face })
}
