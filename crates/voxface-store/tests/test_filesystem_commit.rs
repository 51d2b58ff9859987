//! Integration tests against the real filesystem.

use std::fs;

use pretty_assertions::assert_eq;
use voxface_core::{
    decode_face_sequence, decode_wav, AnimationFrame, AnimationSequence, RecordingError,
};
use voxface_store::{
    save_audio_and_face, save_audio_and_face_as_assets, AssetKind, DirectoryRegistry, FsSink,
    RecordingConfig,
};

fn speech_pcm() -> Vec<u8> {
    (0..1600i16)
        .flat_map(|n| (n.wrapping_mul(37) % 2000).to_le_bytes())
        .collect()
}

fn viseme_sequence() -> AnimationSequence {
    let mut sequence = AnimationSequence::new(0.1, 30.0);
    for i in 0..3 {
        sequence.push_frame(
            AnimationFrame::new(i)
                .with_blend_shape("JawOpen", i as f32 * 0.25)
                .with_blend_shape("MouthFunnel", 0.5),
        );
    }
    sequence
}

#[test]
fn test_save_pair_to_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("session").join("greeting");

    let saved = save_audio_and_face(
        &speech_pcm(),
        &viseme_sequence(),
        &base,
        16000,
        1,
        &mut FsSink::new(),
    )
    .unwrap();

    assert_eq!(saved.audio, tmp.path().join("session").join("greeting.wav"));
    let wav = fs::read(&saved.audio).unwrap();
    assert_eq!(decode_wav(&wav).unwrap().pcm, speech_pcm());

    let face = fs::read_to_string(&saved.face).unwrap();
    assert_eq!(decode_face_sequence(&face).unwrap(), viseme_sequence());
}

#[test]
fn test_blocked_face_path_leaves_no_files() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("greeting");
    // A directory where the JSON file should go makes the face commit fail.
    fs::create_dir(tmp.path().join("greeting.json")).unwrap();

    let err = save_audio_and_face(
        &speech_pcm(),
        &viseme_sequence(),
        &base,
        16000,
        1,
        &mut FsSink::new(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        RecordingError::PartialCommit {
            rolled_back: true,
            ..
        }
    ));
    assert!(!tmp.path().join("greeting.wav").exists());
}

#[test]
fn test_empty_pcm_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("silence");

    let err = save_audio_and_face(&[], &viseme_sequence(), &base, 16000, 1, &mut FsSink::new())
        .unwrap_err();
    assert!(matches!(err, RecordingError::EmptyInput { .. }));
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn test_save_assets_to_directory_registry() {
    let tmp = tempfile::tempdir().unwrap();
    let config = RecordingConfig::default();
    let mut registry = DirectoryRegistry::new(tmp.path(), &config.package_path);

    let saved = save_audio_and_face_as_assets(
        &speech_pcm(),
        &viseme_sequence(),
        "Greeting",
        16000,
        1,
        &config,
        &mut registry,
    )
    .unwrap();

    let wav = fs::read(registry.payload_path(&saved.audio.name, AssetKind::SoundWave)).unwrap();
    assert_eq!(decode_wav(&wav).unwrap().format.sample_rate(), 16000);
    assert_eq!(registry.manifest("Greeting_Face").unwrap().kind, AssetKind::FaceAnimation);
}

#[test]
fn test_asset_name_collision_discards_new_audio() {
    let tmp = tempfile::tempdir().unwrap();
    let config = RecordingConfig::default();
    let mut registry = DirectoryRegistry::new(tmp.path(), &config.package_path);

    save_audio_and_face_as_assets(
        &speech_pcm(),
        &viseme_sequence(),
        "Take",
        16000,
        1,
        &config,
        &mut registry,
    )
    .unwrap();

    // Removing only the audio asset makes the second save collide on the face asset.
    fs::remove_file(registry.payload_path("Take_Audio", AssetKind::SoundWave)).unwrap();
    fs::remove_file(registry.manifest_path("Take_Audio")).unwrap();

    let err = save_audio_and_face_as_assets(
        &speech_pcm(),
        &viseme_sequence(),
        "Take",
        16000,
        1,
        &config,
        &mut registry,
    )
    .unwrap_err();

    assert_eq!(err.code(), "REC_005");
    assert!(!registry.payload_path("Take_Audio", AssetKind::SoundWave).exists());
    assert!(registry.payload_path("Take_Face", AssetKind::FaceAnimation).exists());
}
