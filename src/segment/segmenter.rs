//! Utterance segmentation state machine.
//!
//! Consumes per-block energy labels and raw blocks, emitting a complete
//! utterance once a long enough run of trailing silence is observed. Silent
//! blocks seen while speaking are buffered anyway (hysteresis), so trailing
//! syllables captured right at the energy drop are not clipped and brief
//! pauses inside a sentence do not split it.
//!
//! Silence is measured by sample count, never wall clock, so the machine is
//! a deterministic function of the block sequence and configuration. No step
//! can fail.

use crate::audio::block::AudioBlock;
use crate::segment::energy::EnergyLabel;
use std::time::Instant;

/// Configuration for utterance segmentation.
#[derive(Debug, Clone, Copy)]
pub struct SegmenterConfig {
    /// Sample rate used to convert durations to sample counts.
    pub sample_rate: u32,
    /// Trailing silence required to end an utterance, in seconds.
    pub silence_duration_secs: f32,
    /// Minimum utterance duration for emission, in seconds.
    pub min_speech_duration_secs: f32,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            sample_rate: crate::defaults::SAMPLE_RATE,
            silence_duration_secs: crate::defaults::SILENCE_DURATION_SECS,
            min_speech_duration_secs: crate::defaults::MIN_SPEECH_DURATION_SECS,
        }
    }
}

/// Current segmentation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentationState {
    /// No utterance in progress; silent blocks are dropped.
    Idle,
    /// Accumulating an utterance; tracks consecutive trailing silent blocks.
    Speaking { silent_blocks: u32 },
}

/// A complete utterance: contiguous blocks collected while speaking,
/// including absorbed trailing silence.
#[derive(Debug, Clone)]
pub struct Utterance {
    /// Concatenated samples of every buffered block.
    pub samples: Vec<f32>,
    /// Sample rate of the samples.
    pub sample_rate: u32,
    /// Sequence number of the first speech block.
    pub start_sequence: u64,
    /// Sequence number of the last block before emission.
    pub end_sequence: u64,
    /// Capture time of the first speech block.
    pub started_at: Instant,
    /// Capture time of the last block before emission.
    pub ended_at: Instant,
}

impl Utterance {
    /// Duration of the utterance in seconds.
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// State machine converting labeled blocks into utterance boundaries.
pub struct UtteranceSegmenter {
    config: SegmenterConfig,
    state: SegmentationState,
    buffer: Vec<f32>,
    start_sequence: u64,
    last_sequence: u64,
    started_at: Option<Instant>,
    last_timestamp: Option<Instant>,
    silence_samples_threshold: usize,
    min_speech_samples: usize,
}

impl UtteranceSegmenter {
    /// Creates a segmenter with the given configuration.
    pub fn new(config: SegmenterConfig) -> Self {
        let silence_samples_threshold =
            (config.silence_duration_secs * config.sample_rate as f32) as usize;
        let min_speech_samples =
            (config.min_speech_duration_secs * config.sample_rate as f32) as usize;
        Self {
            config,
            state: SegmentationState::Idle,
            buffer: Vec::new(),
            start_sequence: 0,
            last_sequence: 0,
            started_at: None,
            last_timestamp: None,
            silence_samples_threshold,
            min_speech_samples,
        }
    }

    /// Advances the state machine by one `(block, label)` pair.
    ///
    /// Returns the completed utterance when the trailing-silence threshold is
    /// reached and the utterance meets the minimum duration; sub-minimum
    /// utterances are discarded and yield `None` like any other step.
    pub fn step(&mut self, block: &AudioBlock, label: EnergyLabel) -> Option<Utterance> {
        match (self.state, label) {
            (SegmentationState::Idle, EnergyLabel::Speech) => {
                // Utterance starts with this block; pre-speech silence was dropped
                self.state = SegmentationState::Speaking { silent_blocks: 0 };
                self.buffer.clear();
                self.buffer.extend_from_slice(&block.samples);
                self.start_sequence = block.sequence;
                self.last_sequence = block.sequence;
                self.started_at = Some(block.timestamp);
                self.last_timestamp = Some(block.timestamp);
                None
            }
            (SegmentationState::Idle, EnergyLabel::Silence) => None,
            (SegmentationState::Speaking { .. }, EnergyLabel::Speech) => {
                self.state = SegmentationState::Speaking { silent_blocks: 0 };
                self.buffer.extend_from_slice(&block.samples);
                self.last_sequence = block.sequence;
                self.last_timestamp = Some(block.timestamp);
                None
            }
            (SegmentationState::Speaking { silent_blocks }, EnergyLabel::Silence) => {
                // Hysteresis: buffer the silent block so word endings survive
                self.buffer.extend_from_slice(&block.samples);
                self.last_sequence = block.sequence;
                self.last_timestamp = Some(block.timestamp);
                let run = silent_blocks + 1;

                if run as usize * block.len() >= self.silence_samples_threshold {
                    self.finish_utterance()
                } else {
                    self.state = SegmentationState::Speaking { silent_blocks: run };
                    None
                }
            }
        }
    }

    /// Ends the current utterance, emitting it if long enough.
    fn finish_utterance(&mut self) -> Option<Utterance> {
        self.state = SegmentationState::Idle;
        let samples = std::mem::take(&mut self.buffer);
        // Always set while Speaking; the fallback never fires in practice
        let started_at = self.started_at.take().unwrap_or_else(Instant::now);
        let ended_at = self.last_timestamp.take().unwrap_or(started_at);

        if samples.len() >= self.min_speech_samples {
            Some(Utterance {
                samples,
                sample_rate: self.config.sample_rate,
                start_sequence: self.start_sequence,
                end_sequence: self.last_sequence,
                started_at,
                ended_at,
            })
        } else {
            // Too short: discarded, never delivered downstream
            None
        }
    }

    /// Flushes any in-progress utterance, applying the minimum-duration check.
    ///
    /// Used at end of stream so a final utterance without trailing silence is
    /// not lost.
    pub fn flush(&mut self) -> Option<Utterance> {
        match self.state {
            SegmentationState::Idle => None,
            SegmentationState::Speaking { .. } => self.finish_utterance(),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> SegmentationState {
        self.state
    }

    /// Resets to idle, dropping any buffered audio.
    pub fn reset(&mut self) {
        self.state = SegmentationState::Idle;
        self.buffer.clear();
        self.started_at = None;
        self.last_timestamp = None;
    }
}
