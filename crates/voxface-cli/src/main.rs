//! Voxface CLI - saves captured speech audio and facial animation together
//!
//! Every save writes both artifacts or neither: when the face artifact cannot
//! be committed, the audio artifact written just before it is removed again.

use clap::{ArgAction, Parser, Subcommand};
use std::process::ExitCode;

use voxface_cli::commands;
use voxface_cli::commands::save::SaveArgs;
use voxface_cli::commands::save_assets::SaveAssetsArgs;

/// Voxface - paired audio and face animation recordings
#[derive(Parser)]
#[command(name = "voxface")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write <OUT>.wav and <OUT>.json from a PCM capture and a face document
    Save {
        /// PCM input: raw 16-bit little-endian dump or a WAV file
        #[arg(short, long)]
        pcm: String,

        /// Face document (JSON)
        #[arg(short, long)]
        face: String,

        /// Output base path; the extension is replaced by .wav and .json
        #[arg(short, long)]
        out: String,

        /// Sample rate in Hz (default: WAV header, then config)
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Channel count (default: WAV header, then config)
        #[arg(long)]
        channels: Option<u16>,

        /// Path to a recording config file (JSON)
        #[arg(short, long)]
        config: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Register <NAME>_Audio and <NAME>_Face in a directory-backed asset registry
    SaveAssets {
        /// PCM input: raw 16-bit little-endian dump or a WAV file
        #[arg(short, long)]
        pcm: String,

        /// Face document (JSON)
        #[arg(short, long)]
        face: String,

        /// Base asset name
        #[arg(short, long)]
        name: String,

        /// Registry root directory
        #[arg(short, long)]
        registry: String,

        /// Sample rate in Hz (default: WAV header, then config)
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Channel count (default: WAV header, then config)
        #[arg(long)]
        channels: Option<u16>,

        /// Path to a recording config file (JSON)
        #[arg(short, long)]
        config: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Summarize a WAV file, face document or face asset payload
    Inspect {
        /// File to inspect
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Save {
            pcm,
            face,
            out,
            sample_rate,
            channels,
            config,
            json,
        } => commands::save::run(
            &SaveArgs {
                pcm: &pcm,
                face: &face,
                out: &out,
                sample_rate,
                channels,
                config: config.as_deref(),
            },
            json,
        ),
        Commands::SaveAssets {
            pcm,
            face,
            name,
            registry,
            sample_rate,
            channels,
            config,
            json,
        } => commands::save_assets::run(
            &SaveAssetsArgs {
                pcm: &pcm,
                face: &face,
                name: &name,
                registry: &registry,
                sample_rate,
                channels,
                config: config.as_deref(),
            },
            json,
        ),
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
