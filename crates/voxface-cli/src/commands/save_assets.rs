//! Save-assets command implementation
//!
//! Registers `{name}_Audio` and `{name}_Face` in a directory-backed asset
//! registry.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use voxface_store::{save_audio_and_face_as_assets, DirectoryRegistry};

use super::json_output::{JsonError, SaveAssetsOutput, INPUT_ERROR};
use crate::input::{load_config, load_face_sequence, load_pcm, resolve_format};

/// Options for the save-assets command.
#[derive(Debug, Clone, Default)]
pub struct SaveAssetsArgs<'a> {
    /// PCM input (raw dump or WAV).
    pub pcm: &'a str,
    /// Face document input.
    pub face: &'a str,
    /// Base asset name.
    pub name: &'a str,
    /// Registry root directory.
    pub registry: &'a str,
    /// Sample rate override.
    pub sample_rate: Option<u32>,
    /// Channel count override.
    pub channels: Option<u16>,
    /// Config file.
    pub config: Option<&'a str>,
}

/// Run the save-assets command
///
/// # Returns
/// Exit code: 0 when both assets were registered, 1 otherwise
pub fn run(args: &SaveAssetsArgs<'_>, json_output: bool) -> Result<ExitCode> {
    let inputs = load_config(args.config).and_then(|config| {
        let pcm = load_pcm(Path::new(args.pcm))?;
        let sequence = load_face_sequence(Path::new(args.face))?;
        Ok((config, pcm, sequence))
    });
    let (config, loaded, sequence) = match inputs {
        Ok(inputs) => inputs,
        Err(e) if json_output => {
            let output = SaveAssetsOutput {
                success: false,
                audio: None,
                face: None,
                error: Some(JsonError::new(INPUT_ERROR, format!("{e:#}"))),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e),
    };

    let (sample_rate, channels) =
        resolve_format(&loaded, args.sample_rate, args.channels, &config);
    let mut registry = DirectoryRegistry::new(args.registry, config.package_path.as_str());

    if !json_output {
        println!("{}", "Registering assets:".cyan().bold());
        println!(
            "  {} {}",
            "Registry:".dimmed(),
            registry.package_dir().display()
        );
        println!(
            "  {} {}, {}",
            "Names:".dimmed(),
            config.audio_asset_name(args.name),
            config.face_asset_name(args.name)
        );
    }

    let result = save_audio_and_face_as_assets(
        &loaded.pcm,
        &sequence,
        args.name,
        sample_rate,
        channels,
        &config,
        &mut registry,
    );

    if !json_output {
        let saved = result?;
        println!("\n{}", "Registered both assets:".green().bold());
        println!("  {} {}", "Audio:".dimmed(), saved.audio.object_path);
        println!("  {} {}", "Face Animation:".dimmed(), saved.face.object_path);
        return Ok(ExitCode::SUCCESS);
    }

    let (output, code) = match result {
        Ok(saved) => (
            SaveAssetsOutput {
                success: true,
                audio: Some(saved.audio),
                face: Some(saved.face),
                error: None,
            },
            ExitCode::SUCCESS,
        ),
        Err(e) => (
            SaveAssetsOutput {
                success: false,
                audio: None,
                face: None,
                error: Some(JsonError::from(&e)),
            },
            ExitCode::from(1),
        ),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}
