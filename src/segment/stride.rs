//! Fixed-stride window extraction.
//!
//! The alternative to utterance segmentation: windows are emitted purely by
//! elapsed-sample cadence, ignoring speech/silence entirely. With stride
//! equal to the chunk duration windows are disjoint; smaller strides overlap
//! (duplicate filtering applies downstream); larger strides leave gaps,
//! which is accepted behavior rather than an error.

use crate::segment::window::SlidingWindowBuffer;

/// Configuration for the stride scheduler.
#[derive(Debug, Clone, Copy)]
pub struct StrideConfig {
    /// Window length in samples (chunk duration × sample rate).
    pub chunk_samples: usize,
    /// Sample-count advance between extractions.
    pub stride_samples: usize,
}

impl StrideConfig {
    /// Builds a config from durations in seconds.
    pub fn from_secs(chunk_secs: f32, stride_secs: f32, sample_rate: u32) -> Self {
        Self {
            chunk_samples: (chunk_secs * sample_rate as f32) as usize,
            stride_samples: (stride_secs * sample_rate as f32) as usize,
        }
    }

    /// True when consecutive windows overlap and transcriptions need
    /// duplicate filtering.
    pub fn windows_overlap(&self) -> bool {
        self.stride_samples < self.chunk_samples
    }
}

/// Schedules window extraction from a sliding buffer at a fixed sample cadence.
pub struct StrideScheduler {
    config: StrideConfig,
    buffer: SlidingWindowBuffer,
    samples_seen: u64,
    last_emission_cursor: u64,
}

impl StrideScheduler {
    /// Creates a scheduler with the given configuration.
    pub fn new(config: StrideConfig) -> Self {
        Self {
            config,
            buffer: SlidingWindowBuffer::new(config.chunk_samples),
            samples_seen: 0,
            last_emission_cursor: 0,
        }
    }

    /// Appends a block and returns a window snapshot when one is due.
    ///
    /// A window is due once the buffer is at full capacity and at least
    /// `stride_samples` have arrived since the last emission.
    pub fn on_block(&mut self, samples: &[f32]) -> Option<Vec<f32>> {
        self.buffer.append(samples);
        self.samples_seen += samples.len() as u64;

        if self.buffer.is_full()
            && self.samples_seen - self.last_emission_cursor >= self.config.stride_samples as u64
        {
            self.last_emission_cursor = self.samples_seen;
            Some(self.buffer.snapshot())
        } else {
            None
        }
    }

    /// True when emitted windows overlap.
    pub fn windows_overlap(&self) -> bool {
        self.config.windows_overlap()
    }

    /// Total samples consumed so far.
    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }
}
