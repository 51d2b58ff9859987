//! File variant: `base.wav` + `base.json` through a [`FileSink`].

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use voxface_core::{
    encode_face_sequence_with_layout, encode_wav, AnimationSequence, FaceLayout, RecordingError,
    RecordingResult,
};

use super::SavedPair;
use crate::sink::FileSink;

/// Audio path for a base path: the extension is replaced with `wav`.
pub fn audio_path(base: &Path) -> PathBuf {
    base.with_extension("wav")
}

/// Face data path for a base path: the extension is replaced with `json`.
pub fn face_path(base: &Path) -> PathBuf {
    base.with_extension("json")
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

/// Writes `bytes` to `path` and closes the writer.
///
/// A partially written file is deleted before the error is returned. If it
/// cannot be deleted, the returned error says so.
fn commit_file<S: FileSink>(sink: &mut S, path: &Path, bytes: &[u8]) -> RecordingResult<()> {
    let mut writer = sink
        .create_writer(path)
        .map_err(|e| RecordingError::sink_creation(display(path), e))?;

    let result = match writer.write_all(bytes) {
        Ok(()) => sink.close(writer),
        Err(e) => {
            drop(writer);
            Err(e)
        }
    };
    if let Err(e) = result {
        error!("failed writing {}: {}", path.display(), e);
        if discard_file(sink, path) {
            return Err(e.into());
        }
        error!("partially written file left at {}", path.display());
        return Err(io::Error::new(
            e.kind(),
            format!("{e}; partially written file left at {}", path.display()),
        )
        .into());
    }
    Ok(())
}

/// Deletes `path`, treating a missing file as already rolled back.
fn discard_file<S: FileSink>(sink: &mut S, path: &Path) -> bool {
    match sink.delete_file(path) {
        Ok(true) => {
            info!("removed {}", path.display());
            true
        }
        Ok(false) => {
            debug!("nothing to remove at {}", path.display());
            true
        }
        Err(e) => {
            error!("failed to remove {}: {}", path.display(), e);
            false
        }
    }
}

/// Encodes PCM as WAV and commits it to `path`.
pub fn save_audio_to_wav_file<S: FileSink>(
    pcm: &[u8],
    path: &Path,
    sample_rate: u32,
    channels: u16,
    sink: &mut S,
) -> RecordingResult<()> {
    let wav = encode_wav(pcm, sample_rate, channels)?;
    info!("saving WAV file to {}", path.display());
    commit_file(sink, path, &wav)?;
    info!("saved WAV file {} ({} bytes)", path.display(), wav.len());
    Ok(())
}

/// Encodes a face sequence and commits it to `path`.
pub fn save_face_data_to_json_file<S: FileSink>(
    sequence: &AnimationSequence,
    path: &Path,
    layout: FaceLayout,
    sink: &mut S,
) -> RecordingResult<()> {
    let document = encode_face_sequence_with_layout(sequence, layout)?;
    info!("saving face data to {}", path.display());
    commit_file(sink, path, document.as_bytes())?;
    info!(
        "saved face data {} ({} frames)",
        path.display(),
        sequence.num_frames()
    );
    Ok(())
}

/// Saves `base.wav` and `base.json` as a pair with pretty face documents.
pub fn save_audio_and_face<S: FileSink>(
    pcm: &[u8],
    sequence: &AnimationSequence,
    base: &Path,
    sample_rate: u32,
    channels: u16,
    sink: &mut S,
) -> RecordingResult<SavedPair<PathBuf>> {
    save_audio_and_face_with_layout(
        pcm,
        sequence,
        base,
        sample_rate,
        channels,
        FaceLayout::default(),
        sink,
    )
}

/// Saves `base.wav` and `base.json` as a pair.
///
/// Nothing is committed if either input fails to encode. If the face file
/// cannot be committed after the audio file was, the audio file is deleted
/// and [`RecordingError::PartialCommit`] is returned.
///
/// Existing files at either path are overwritten. Rollback deletes the audio
/// path outright, so when `base.wav` held an earlier take, that take is lost
/// while its `base.json` stays in place. Callers that must keep earlier
/// takes should pick a fresh base path or use the asset variant, whose
/// registries refuse existing names.
pub fn save_audio_and_face_with_layout<S: FileSink>(
    pcm: &[u8],
    sequence: &AnimationSequence,
    base: &Path,
    sample_rate: u32,
    channels: u16,
    layout: FaceLayout,
    sink: &mut S,
) -> RecordingResult<SavedPair<PathBuf>> {
    info!("saving audio and face data with base path {}", base.display());

    let wav = encode_wav(pcm, sample_rate, channels)?;
    let document = encode_face_sequence_with_layout(sequence, layout)?;

    let audio = audio_path(base);
    let face = face_path(base);

    if let Err(e) = commit_file(sink, &audio, &wav) {
        error!("failed to save audio file {}: {}", audio.display(), e);
        return Err(e);
    }

    if let Err(source) = commit_file(sink, &face, document.as_bytes()) {
        error!("failed to save face data file {}: {}", face.display(), source);
        let rolled_back = discard_file(sink, &audio);
        return Err(RecordingError::PartialCommit {
            committed: display(&audio),
            failed: display(&face),
            rolled_back,
            source: Box::new(source),
        });
    }

    info!(
        "saved audio {} and face data {}",
        audio.display(),
        face.display()
    );
    Ok(SavedPair { audio, face })
}
