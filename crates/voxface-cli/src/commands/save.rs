//! Save command implementation
//!
//! Writes `<out>.wav` and `<out>.json` from a PCM dump and a face document.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use voxface_store::{save_audio_and_face_with_layout, FsSink};

use super::json_output::{AudioSummary, JsonError, SaveOutput, INPUT_ERROR};
use crate::input::{load_config, load_face_sequence, load_pcm, resolve_format};

/// Options for the save command.
#[derive(Debug, Clone, Default)]
pub struct SaveArgs<'a> {
    /// PCM input (raw dump or WAV).
    pub pcm: &'a str,
    /// Face document input.
    pub face: &'a str,
    /// Output base path.
    pub out: &'a str,
    /// Sample rate override.
    pub sample_rate: Option<u32>,
    /// Channel count override.
    pub channels: Option<u16>,
    /// Config file.
    pub config: Option<&'a str>,
}

/// Run the save command
///
/// # Returns
/// Exit code: 0 when both files were written, 1 otherwise
pub fn run(args: &SaveArgs<'_>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(args)
    } else {
        run_human(args)
    }
}

fn run_human(args: &SaveArgs<'_>) -> Result<ExitCode> {
    let config = load_config(args.config)?;
    let loaded = load_pcm(Path::new(args.pcm))?;
    let sequence = load_face_sequence(Path::new(args.face))?;
    let (sample_rate, channels) =
        resolve_format(&loaded, args.sample_rate, args.channels, &config);

    println!("{}", "Saving recording:".cyan().bold());
    println!("  {} {} ({})", "PCM:".dimmed(), args.pcm, loaded.source);
    println!("  {} {}", "Face:".dimmed(), args.face);
    println!(
        "  {} {} Hz, {} channel(s)",
        "Format:".dimmed(),
        sample_rate,
        channels
    );

    let saved = save_audio_and_face_with_layout(
        &loaded.pcm,
        &sequence,
        Path::new(args.out),
        sample_rate,
        channels,
        config.face_layout,
        &mut FsSink::new(),
    )?;

    println!("\n{}", "Saved both files:".green().bold());
    println!("  {} {}", "Audio:".dimmed(), saved.audio.display());
    println!(
        "  {} {} ({} frames)",
        "Face Data:".dimmed(),
        saved.face.display(),
        sequence.num_frames()
    );
    Ok(ExitCode::SUCCESS)
}

fn failure(error: JsonError, frames: usize) -> SaveOutput {
    SaveOutput {
        success: false,
        audio: None,
        face: None,
        audio_summary: None,
        frames,
        error: Some(error),
    }
}

fn run_json(args: &SaveArgs<'_>) -> Result<ExitCode> {
    let loaded = load_config(args.config).and_then(|config| {
        let pcm = load_pcm(Path::new(args.pcm))?;
        let sequence = load_face_sequence(Path::new(args.face))?;
        Ok((config, pcm, sequence))
    });
    let (config, loaded, sequence) = match loaded {
        Ok(inputs) => inputs,
        Err(e) => {
            let output = failure(JsonError::new(INPUT_ERROR, format!("{e:#}")), 0);
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(ExitCode::from(1));
        }
    };
    let (sample_rate, channels) =
        resolve_format(&loaded, args.sample_rate, args.channels, &config);

    let result = save_audio_and_face_with_layout(
        &loaded.pcm,
        &sequence,
        Path::new(args.out),
        sample_rate,
        channels,
        config.face_layout,
        &mut FsSink::new(),
    );

    let (output, code) = match result {
        Ok(saved) => (
            SaveOutput {
                success: true,
                audio: Some(saved.audio.display().to_string()),
                face: Some(saved.face.display().to_string()),
                audio_summary: Some(AudioSummary {
                    source: loaded.source,
                    sample_rate,
                    channels,
                    pcm_bytes: loaded.pcm.len(),
                    pcm_hash: voxface_core::wav::pcm_hash(&loaded.pcm),
                }),
                frames: sequence.num_frames(),
                error: None,
            },
            ExitCode::SUCCESS,
        ),
        Err(e) => (
            failure(JsonError::from(&e), sequence.num_frames()),
            ExitCode::from(1),
        ),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use voxface_core::{encode_face_sequence, AnimationFrame, AnimationSequence};

    fn write_inputs(dir: &Path) -> (String, String) {
        let pcm = dir.join("take.pcm");
        fs::write(&pcm, [1u8, 0, 2, 0, 3, 0, 4, 0]).unwrap();
        let face = dir.join("take.face.json");
        let sequence = AnimationSequence::new(0.25, 4.0)
            .with_frame(AnimationFrame::new(0).with_blend_shape("JawOpen", 0.5));
        fs::write(&face, encode_face_sequence(&sequence).unwrap()).unwrap();
        (
            pcm.display().to_string(),
            face.display().to_string(),
        )
    }

    #[test]
    fn test_save_writes_pair() {
        let tmp = tempfile::tempdir().unwrap();
        let (pcm, face) = write_inputs(tmp.path());
        let out = tmp.path().join("out").join("greeting");
        let out = out.display().to_string();

        let args = SaveArgs {
            pcm: &pcm,
            face: &face,
            out: &out,
            sample_rate: Some(16000),
            ..SaveArgs::default()
        };
        let code = run(&args, false).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(tmp.path().join("out").join("greeting.wav").exists());
        assert!(tmp.path().join("out").join("greeting.json").exists());
    }

    #[test]
    fn test_save_json_reports_failure_code() {
        let tmp = tempfile::tempdir().unwrap();
        let (pcm, face) = write_inputs(tmp.path());
        let out = tmp.path().join("greeting").display().to_string();

        let args = SaveArgs {
            pcm: &pcm,
            face: &face,
            out: &out,
            channels: Some(3),
            ..SaveArgs::default()
        };
        // 8 bytes is not a whole number of 3-channel frames
        let code = run(&args, true).unwrap();
        assert_eq!(code, ExitCode::from(1));
        assert!(!tmp.path().join("greeting.wav").exists());
    }

    #[test]
    fn test_save_human_propagates_missing_input() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("none.pcm").display().to_string();
        let args = SaveArgs {
            pcm: &missing,
            face: &missing,
            out: "unused",
            ..SaveArgs::default()
        };
        assert!(run(&args, false).is_err());
    }
}
