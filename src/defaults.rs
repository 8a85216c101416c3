//! Default configuration constants for streamscribe.
//!
//! Single home for every tunable default so the config types, CLI help, and
//! tests agree on the same numbers.

use std::time::Duration;

/// Default audio sample rate in Hz.
///
/// 16 kHz is the common rate for speech recognition input; all duration
/// math converts through it.
pub const SAMPLE_RATE: u32 = 16000;

/// Default energy threshold for speech detection.
///
/// Mean absolute amplitude (0.0 to 1.0) above which a block counts as speech.
/// 0.01 is tuned for loopback/line-level input; operators raise it in noisy
/// environments.
pub const ENERGY_THRESHOLD: f32 = 0.01;

/// Default silence duration in seconds before an utterance is considered ended.
///
/// 2.0 seconds allows for natural pauses in speech without prematurely
/// splitting a sentence into separate utterances.
pub const SILENCE_DURATION_SECS: f32 = 2.0;

/// Default minimum utterance duration in seconds.
///
/// Utterances shorter than this are discarded without transcription. Filters
/// out door slams, coughs, and other brief energy spikes.
pub const MIN_SPEECH_DURATION_SECS: f32 = 1.0;

/// Default sliding-window length in seconds for stride mode.
pub const CHUNK_DURATION_SECS: f32 = 5.0;

/// Default stride between window extractions in seconds.
///
/// Smaller than the chunk duration, so consecutive windows overlap and the
/// duplicate filter applies to their transcriptions.
pub const STRIDE_SECS: f32 = 2.0;

/// Timeout for each blocking read from the block queue.
///
/// Bounds how long the consumer loop waits for audio, so an idle source never
/// hangs the loop and the stop flag is checked at least this often.
pub const READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Word-set overlap ratio above which a window's transcription is suppressed
/// as a near-duplicate of the previously emitted text.
pub const DEDUP_OVERLAP_RATIO: f32 = 0.7;

/// Minimum mean absolute amplitude for a window to be worth transcribing.
///
/// Windows below this are silence or ambient noise in stride mode and skip
/// the transcriber entirely. Set well below ENERGY_THRESHOLD to only reject
/// truly silent windows while allowing anything borderline.
pub const WINDOW_ENERGY_FLOOR: f32 = 0.001;

/// Minimum transcript length (chars) for the assistant to treat it as a question.
///
/// Shorter recognition results are fragments or noise and are ignored.
pub const MIN_QUESTION_CHARS: usize = 10;

/// Default language code for transcription.
///
/// "auto" lets the transcription engine detect the spoken language.
/// Set to a specific code (e.g., "en", "ko") to force a language.
pub const DEFAULT_LANGUAGE: &str = "auto";
