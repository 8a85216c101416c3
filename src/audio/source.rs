//! Block source abstraction over audio capture.
//!
//! Physical capture (device selection, resampling, loopback) lives outside
//! this crate; the pipeline only needs an ordered stream of fixed-size blocks.

use crate::audio::block::AudioBlock;
use crate::error::{Result, StreamscribeError};
use std::time::Duration;

/// Trait for producers of audio blocks.
///
/// This trait allows swapping implementations (real capture vs mock vs
/// file replay).
pub trait BlockSource: Send {
    /// Start producing blocks.
    fn start(&mut self) -> Result<()>;

    /// Stop producing blocks.
    fn stop(&mut self) -> Result<()>;

    /// Read the next block, waiting at most `timeout`.
    ///
    /// # Returns
    /// `Ok(Some(block))` when a block is available, `Ok(None)` on timeout or
    /// end of stream, or an error if the source failed.
    fn read(&mut self, timeout: Duration) -> Result<Option<AudioBlock>>;

    /// Returns true once the source will never produce another block.
    ///
    /// Live capture never exhausts; finite sources (files, mocks) report
    /// true after the last block so the feeder can shut down cleanly.
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// Mock block source for testing: replays a fixed list of blocks.
#[derive(Debug, Clone)]
pub struct MockBlockSource {
    blocks: Vec<Vec<f32>>,
    sample_rate: u32,
    next: usize,
    sequence: u64,
    is_started: bool,
    should_fail_start: bool,
}

impl MockBlockSource {
    /// Create a mock source that yields the given blocks in order.
    pub fn new(blocks: Vec<Vec<f32>>, sample_rate: u32) -> Self {
        Self {
            blocks,
            sample_rate,
            next: 0,
            sequence: 0,
            is_started: false,
            should_fail_start: false,
        }
    }

    /// Configure the mock to fail on start.
    pub fn with_start_failure(mut self) -> Self {
        self.should_fail_start = true;
        self
    }

    /// Check if the source is started.
    pub fn is_started(&self) -> bool {
        self.is_started
    }

    /// Returns how many blocks remain unread.
    pub fn remaining(&self) -> usize {
        self.blocks.len().saturating_sub(self.next)
    }
}

impl BlockSource for MockBlockSource {
    fn start(&mut self) -> Result<()> {
        if self.should_fail_start {
            return Err(StreamscribeError::AudioSource {
                message: "mock start failure".to_string(),
            });
        }
        self.is_started = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.is_started = false;
        Ok(())
    }

    fn read(&mut self, _timeout: Duration) -> Result<Option<AudioBlock>> {
        if self.next >= self.blocks.len() {
            return Ok(None);
        }
        let samples = self.blocks[self.next].clone();
        self.next += 1;
        let seq = self.sequence;
        self.sequence += 1;
        Ok(Some(AudioBlock::new(seq, samples, self.sample_rate)))
    }

    fn is_exhausted(&self) -> bool {
        self.next >= self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_source_yields_blocks_in_order() {
        let mut source = MockBlockSource::new(vec![vec![0.1; 4], vec![0.2; 4]], 16000);
        source.start().unwrap();

        let first = source.read(Duration::from_millis(10)).unwrap().unwrap();
        assert_eq!(first.sequence, 0);
        assert_eq!(first.samples, vec![0.1; 4]);

        let second = source.read(Duration::from_millis(10)).unwrap().unwrap();
        assert_eq!(second.sequence, 1);
        assert_eq!(second.samples, vec![0.2; 4]);

        assert!(source.read(Duration::from_millis(10)).unwrap().is_none());
    }

    #[test]
    fn test_mock_source_start_failure() {
        let mut source = MockBlockSource::new(Vec::new(), 16000).with_start_failure();
        assert!(source.start().is_err());
        assert!(!source.is_started());
    }

    #[test]
    fn test_mock_source_remaining() {
        let mut source = MockBlockSource::new(vec![vec![0.0; 2]; 3], 16000);
        assert_eq!(source.remaining(), 3);
        source.read(Duration::ZERO).unwrap();
        assert_eq!(source.remaining(), 2);
    }

    #[test]
    fn test_mock_source_stop() {
        let mut source = MockBlockSource::new(Vec::new(), 16000);
        source.start().unwrap();
        assert!(source.is_started());
        source.stop().unwrap();
        assert!(!source.is_started());
    }
}
