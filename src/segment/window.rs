//! Fixed-capacity sliding window over the most recent samples.
//!
//! Used by stride mode: always holds the newest `capacity` samples,
//! independent of speech/silence state.

use std::collections::VecDeque;

/// Ring-semantics sample buffer: appending beyond capacity evicts the oldest
/// samples. Length never exceeds the configured capacity.
#[derive(Debug, Clone)]
pub struct SlidingWindowBuffer {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl SlidingWindowBuffer {
    /// Creates a buffer holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends samples, evicting the oldest if capacity is exceeded.
    ///
    /// Appending a block larger than the capacity keeps only its trailing
    /// `capacity` samples.
    pub fn append(&mut self, block: &[f32]) {
        // A block at least as large as the buffer replaces it entirely
        if block.len() >= self.capacity {
            self.samples.clear();
            self.samples
                .extend(block[block.len() - self.capacity..].iter().copied());
            return;
        }

        let overflow = (self.samples.len() + block.len()).saturating_sub(self.capacity);
        for _ in 0..overflow {
            self.samples.pop_front();
        }
        self.samples.extend(block.iter().copied());
    }

    /// Returns a copy of the current contents, oldest-first.
    pub fn snapshot(&self) -> Vec<f32> {
        self.samples.iter().copied().collect()
    }

    /// Current occupancy in samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if no samples are buffered.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns true if the buffer holds exactly `capacity` samples.
    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    /// Configured capacity in samples.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
