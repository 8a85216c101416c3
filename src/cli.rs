//! Command-line interface for streamscribe
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Streaming speech segmentation and transcription
#[derive(Parser, Debug)]
#[command(
    name = "streamscribe",
    version,
    about = "Streaming speech segmentation and transcription"
)]
pub struct Cli {
    /// WAV file to replay through the pipeline
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Segmentation mode
    #[arg(long, value_enum, default_value = "vad")]
    pub mode: Mode,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress per-transcript output (quiet mode)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output (print run statistics)
    #[arg(short, long)]
    pub verbose: bool,

    /// Mean absolute amplitude above which a block counts as speech
    #[arg(long, value_name = "LEVEL")]
    pub energy_threshold: Option<f32>,

    /// Silence duration in seconds that closes an utterance (vad mode)
    #[arg(long, value_name = "SECONDS")]
    pub silence_duration: Option<f32>,

    /// Minimum utterance duration in seconds; shorter ones are discarded (vad mode)
    #[arg(long, value_name = "SECONDS")]
    pub min_speech_duration: Option<f32>,

    /// Window length in seconds (stride mode)
    #[arg(long, value_name = "SECONDS")]
    pub chunk_duration: Option<f32>,

    /// Seconds between windows; defaults to the chunk duration (stride mode)
    #[arg(long, value_name = "SECONDS")]
    pub stride: Option<f32>,

    /// Language code for transcription (default: auto-detect). Examples: auto, en, de
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Append every transcript to this file
    #[arg(long, value_name = "PATH")]
    pub save_log: Option<PathBuf>,
}

/// How the audio stream is cut into transcription units.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Silence-gated utterances with hysteresis
    Vad,
    /// Fixed-length sliding windows on a stride
    Stride,
}

impl Cli {
    /// Folds CLI overrides into a loaded config. CLI flags win over both the
    /// config file and environment overrides.
    pub fn apply_overrides(&self, config: &mut crate::config::Config) {
        if let Some(threshold) = self.energy_threshold {
            config.vad.energy_threshold = threshold;
        }
        if let Some(secs) = self.silence_duration {
            config.vad.silence_duration_seconds = secs;
        }
        if let Some(secs) = self.min_speech_duration {
            config.vad.min_speech_duration_seconds = secs;
        }
        if let Some(secs) = self.chunk_duration {
            config.window.chunk_duration_seconds = secs;
        }
        if let Some(secs) = self.stride {
            config.window.stride_seconds = Some(secs);
        }
        if let Some(language) = &self.language {
            config.stt.language = language.clone();
        }
    }
}
