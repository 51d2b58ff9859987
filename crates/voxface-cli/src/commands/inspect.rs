//! Inspect command implementation
//!
//! Summarizes a WAV file, a face document, or a face animation asset payload.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use voxface_core::wav::pcm_hash;
use voxface_core::{decode_face_asset, decode_face_sequence, decode_wav, AnimationSequence};

use super::json_output::{InspectOutput, JsonError, INPUT_ERROR};
use crate::input::looks_like_wav;

/// Run the inspect command
pub fn run(input: &str, json_output: bool) -> Result<ExitCode> {
    let result = inspect_file(Path::new(input));

    if json_output {
        let (output, code) = match result {
            Ok(output) => (output, ExitCode::SUCCESS),
            Err(e) => (
                InspectOutput::Error {
                    error: JsonError::new(INPUT_ERROR, format!("{e:#}")),
                },
                ExitCode::from(1),
            ),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(code);
    }

    print_human(input, &result?);
    Ok(ExitCode::SUCCESS)
}

/// Decode `path` and build its summary.
pub fn inspect_file(path: &Path) -> Result<InspectOutput> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read: {}", path.display()))?;

    if looks_like_wav(&bytes) {
        let decoded = decode_wav(&bytes)
            .with_context(|| format!("Failed to decode WAV: {}", path.display()))?;
        let format = decoded.format;
        return Ok(InspectOutput::Wav {
            sample_rate: format.sample_rate(),
            channels: format.channels(),
            byte_rate: format.byte_rate(),
            block_align: format.block_align(),
            pcm_bytes: decoded.pcm.len(),
            duration_seconds: format.duration_seconds(decoded.pcm.len()),
            pcm_hash: pcm_hash(&decoded.pcm),
        });
    }

    let text = std::str::from_utf8(&bytes)
        .with_context(|| format!("Not a WAV file or UTF-8 JSON: {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(text)
        .with_context(|| format!("Not a WAV file or JSON document: {}", path.display()))?;

    let (sequence, asset) = if value.get("FaceSequence").is_some() {
        let asset = decode_face_asset(text)
            .with_context(|| format!("Invalid face animation asset: {}", path.display()))?;
        (asset.face_sequence, true)
    } else {
        let sequence = decode_face_sequence(text)
            .with_context(|| format!("Invalid face document: {}", path.display()))?;
        (sequence, false)
    };
    Ok(face_summary(&sequence, asset))
}

fn face_summary(sequence: &AnimationSequence, asset: bool) -> InspectOutput {
    let mut blend_shapes: Vec<String> = Vec::new();
    for frame in &sequence.frames {
        for name in frame.blend_shapes.keys() {
            if !blend_shapes.contains(name) {
                blend_shapes.push(name.clone());
            }
        }
    }
    let indices = sequence.frames.iter().map(|f| f.frame_index);
    let frame_index_range = indices.clone().min().zip(indices.max());

    InspectOutput::Face {
        asset,
        duration: sequence.duration,
        frame_rate: sequence.frame_rate,
        frames: sequence.num_frames(),
        frame_index_range,
        blend_shapes,
    }
}

fn print_human(input: &str, output: &InspectOutput) {
    println!("{} {}", "Inspecting:".cyan().bold(), input);
    match output {
        InspectOutput::Wav {
            sample_rate,
            channels,
            byte_rate,
            block_align,
            pcm_bytes,
            duration_seconds,
            pcm_hash,
        } => {
            println!("  {} WAV (16-bit PCM)", "Type:".dimmed());
            println!("  {} {} Hz", "Sample rate:".dimmed(), sample_rate);
            println!("  {} {}", "Channels:".dimmed(), channels);
            println!("  {} {} B/s", "Byte rate:".dimmed(), byte_rate);
            println!("  {} {}", "Block align:".dimmed(), block_align);
            println!("  {} {} bytes", "Data:".dimmed(), pcm_bytes);
            println!("  {} {:.3} s", "Duration:".dimmed(), duration_seconds);
            println!("  {} {}", "PCM hash:".dimmed(), &pcm_hash[..16]);
        }
        InspectOutput::Face {
            asset,
            duration,
            frame_rate,
            frames,
            frame_index_range,
            blend_shapes,
        } => {
            let kind = if *asset {
                "face animation asset"
            } else {
                "face document"
            };
            println!("  {} {}", "Type:".dimmed(), kind);
            println!("  {} {} s", "Duration:".dimmed(), duration);
            println!("  {} {} fps", "Frame rate:".dimmed(), frame_rate);
            println!("  {} {}", "Frames:".dimmed(), frames);
            if let Some((first, last)) = frame_index_range {
                println!("  {} {}..={}", "Frame indices:".dimmed(), first, last);
            }
            println!(
                "  {} {}",
                "Blendshapes:".dimmed(),
                if blend_shapes.is_empty() {
                    "(none)".to_string()
                } else {
                    blend_shapes.join(", ")
                }
            );
        }
        InspectOutput::Error { error } => {
            println!("  {} {}", "Error:".red(), error.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use voxface_core::{
        encode_face_asset, encode_face_sequence, encode_wav, AnimationFrame, FaceLayout,
    };

    fn sample_sequence() -> AnimationSequence {
        AnimationSequence::new(1.0, 30.0)
            .with_frame(
                AnimationFrame::new(3)
                    .with_blend_shape("JawOpen", 0.5)
                    .with_blend_shape("MouthClose", 0.1),
            )
            .with_frame(
                AnimationFrame::new(4)
                    .with_blend_shape("JawOpen", 0.25)
                    .with_blend_shape("TongueOut", 0.75),
            )
    }

    #[test]
    fn test_inspect_wav() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("take.wav");
        fs::write(&path, encode_wav(&[0u8; 64000], 16000, 2).unwrap()).unwrap();

        match inspect_file(&path).unwrap() {
            InspectOutput::Wav {
                sample_rate,
                channels,
                byte_rate,
                duration_seconds,
                ..
            } => {
                assert_eq!(sample_rate, 16000);
                assert_eq!(channels, 2);
                assert_eq!(byte_rate, 64000);
                assert_eq!(duration_seconds, 1.0);
            }
            other => panic!("expected WAV summary, got {other:?}"),
        }
    }

    #[test]
    fn test_inspect_face_document() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("take.json");
        fs::write(&path, encode_face_sequence(&sample_sequence()).unwrap()).unwrap();

        match inspect_file(&path).unwrap() {
            InspectOutput::Face {
                asset,
                frames,
                frame_index_range,
                blend_shapes,
                ..
            } => {
                assert!(!asset);
                assert_eq!(frames, 2);
                assert_eq!(frame_index_range, Some((3, 4)));
                assert_eq!(blend_shapes, vec!["JawOpen", "MouthClose", "TongueOut"]);
            }
            other => panic!("expected face summary, got {other:?}"),
        }
    }

    #[test]
    fn test_inspect_face_asset() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("Greeting_Face.json");
        fs::write(
            &path,
            encode_face_asset(&sample_sequence(), FaceLayout::Compact).unwrap(),
        )
        .unwrap();

        assert!(matches!(
            inspect_file(&path).unwrap(),
            InspectOutput::Face { asset: true, .. }
        ));
    }

    #[test]
    fn test_inspect_rejects_unknown_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();
        assert!(inspect_file(&path).is_err());
        assert_eq!(
            run(&path.display().to_string(), true).unwrap(),
            ExitCode::from(1)
        );
    }
}
