//! Terminal rendering for the binary.
//! Diagnostics go to stderr so stdout stays transcript-only.

use crate::cli::Mode;
use crate::config::Config;
use crate::pipeline::utterance::UtteranceStats;
use crate::pipeline::windowed::WindowedStats;
use std::path::Path;

const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Print the run header: input, mode, and the parameters that matter for it.
pub fn print_banner(input: &Path, mode: Mode, config: &Config, duration_secs: f32) {
    eprintln!(
        "{DIM}input: {} ({:.1}s at {} Hz){RESET}",
        input.display(),
        duration_secs,
        config.audio.sample_rate
    );
    match mode {
        Mode::Vad => eprintln!(
            "{DIM}mode: vad (threshold {}, silence {:.1}s, min speech {:.1}s){RESET}",
            config.vad.energy_threshold,
            config.vad.silence_duration_seconds,
            config.vad.min_speech_duration_seconds
        ),
        Mode::Stride => eprintln!(
            "{DIM}mode: stride (chunk {:.1}s, stride {:.1}s){RESET}",
            config.window.chunk_duration_seconds,
            config.window.effective_stride_seconds()
        ),
    }
}

/// Print run counters for a vad-mode session.
pub fn print_utterance_stats(stats: &UtteranceStats) {
    eprintln!(
        "{DIM}{} blocks, {} utterances, {} delivered, {} failures{RESET}",
        stats.blocks_processed,
        stats.utterances_detected,
        stats.transcripts_delivered,
        stats.transcription_failures
    );
}

/// Print run counters for a stride-mode session.
pub fn print_windowed_stats(stats: &WindowedStats) {
    eprintln!(
        "{DIM}{} blocks, {} windows ({} quiet, {} duplicate), {} delivered, {} failures{RESET}",
        stats.blocks_processed,
        stats.windows_emitted,
        stats.windows_skipped_quiet,
        stats.duplicates_suppressed,
        stats.transcripts_delivered,
        stats.transcription_failures
    );
}
