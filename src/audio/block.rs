//! Audio block type flowing from the source into the segmentation loop.

use std::time::Instant;

/// A fixed-size block of mono float samples with capture metadata.
///
/// Blocks arrive in strict temporal order and are never split or reordered
/// downstream.
#[derive(Debug, Clone)]
pub struct AudioBlock {
    /// Sequence number for ordering blocks.
    pub sequence: u64,
    /// Timestamp when the audio was captured.
    pub timestamp: Instant,
    /// Mono samples in the [-1.0, 1.0] range.
    pub samples: Vec<f32>,
    /// Sample rate the block was produced at.
    pub sample_rate: u32,
}

impl AudioBlock {
    /// Creates a new audio block.
    pub fn new(sequence: u64, samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            sequence,
            timestamp: Instant::now(),
            samples,
            sample_rate,
        }
    }

    /// Returns the number of samples in this block.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the block holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the duration of this block in seconds.
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_creation() {
        let samples = vec![0.1f32, -0.2, 0.3];
        let block = AudioBlock::new(42, samples.clone(), 16000);

        assert_eq!(block.sequence, 42);
        assert_eq!(block.samples, samples);
        assert_eq!(block.sample_rate, 16000);
        assert_eq!(block.len(), 3);
        assert!(!block.is_empty());
    }

    #[test]
    fn test_block_duration() {
        let block = AudioBlock::new(0, vec![0.0; 16000], 16000);
        assert!((block.duration_secs() - 1.0).abs() < f32::EPSILON);

        let block = AudioBlock::new(0, vec![0.0; 8000], 16000);
        assert!((block.duration_secs() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_block() {
        let block = AudioBlock::new(0, Vec::new(), 16000);
        assert!(block.is_empty());
        assert_eq!(block.duration_secs(), 0.0);
    }
}
