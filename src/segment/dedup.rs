//! Near-duplicate suppression for overlapping window transcriptions.
//!
//! When the stride is smaller than the chunk duration, consecutive windows
//! share most of their audio and the transcriber tends to restate the same
//! sentence. This filter compares lower-cased word sets and suppresses the
//! newer text when most of its words already appeared in the previously
//! emitted text. It is a heuristic for high-overlap consecutive windows,
//! not a general text-similarity algorithm: near-duplicate phrasing with low
//! word overlap is still emitted.

use std::collections::HashSet;

/// Configuration for the duplicate filter.
#[derive(Debug, Clone, Copy)]
pub struct DedupConfig {
    /// Word-set overlap ratio above which the newer text is suppressed.
    pub overlap_ratio: f32,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            overlap_ratio: crate::defaults::DEDUP_OVERLAP_RATIO,
        }
    }
}

/// Filter holding the single most recently emitted text.
///
/// The memory updates only on actual emissions; suppressed text is not
/// remembered, so a slowly drifting series of near-duplicates each staying
/// just under the threshold will all be emitted.
#[derive(Debug, Clone, Default)]
pub struct DedupFilter {
    config: DedupConfig,
    last_emitted: String,
}

impl DedupFilter {
    /// Creates a filter with the default overlap threshold.
    pub fn new() -> Self {
        Self::with_config(DedupConfig::default())
    }

    /// Creates a filter with a custom configuration.
    pub fn with_config(config: DedupConfig) -> Self {
        Self {
            config,
            last_emitted: String::new(),
        }
    }

    /// Decides whether `current` restates the previously emitted text.
    ///
    /// The ratio is asymmetric: the denominator is the current text's word
    /// count, so a short window fully contained in the previous emission is
    /// suppressed while a long window that merely includes it is not.
    /// An empty previous text (first window) or a current text with no words
    /// never suppresses.
    pub fn should_suppress(previous: &str, current: &str, overlap_ratio: f32) -> bool {
        let previous_words = word_set(previous);
        if previous_words.is_empty() {
            return false;
        }

        let current_words = word_set(current);
        if current_words.is_empty() {
            return false;
        }

        let shared = current_words.intersection(&previous_words).count();
        let overlap = shared as f32 / current_words.len() as f32;
        overlap > overlap_ratio
    }

    /// Runs the filter against the remembered text.
    ///
    /// Returns `true` and updates the memory when `current` should be
    /// emitted; returns `false` (suppressed, memory untouched) otherwise.
    pub fn check_and_remember(&mut self, current: &str) -> bool {
        if Self::should_suppress(&self.last_emitted, current, self.config.overlap_ratio) {
            false
        } else {
            self.last_emitted = current.to_string();
            true
        }
    }

    /// The most recently emitted text, empty before the first emission.
    pub fn last_emitted(&self) -> &str {
        &self.last_emitted
    }

    /// Clears the emission memory.
    pub fn reset(&mut self) {
        self.last_emitted.clear();
    }
}

/// Lower-cased unique words of a text.
fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect()
}
