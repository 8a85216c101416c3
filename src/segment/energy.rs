//! Energy-based speech/silence classification.
//!
//! A block counts as speech when its mean absolute amplitude exceeds a
//! caller-supplied threshold. This is a tunable heuristic, not a statistical
//! voice-activity model.

/// Per-block classification result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyLabel {
    /// Mean absolute amplitude above the threshold.
    Speech,
    /// Mean absolute amplitude at or below the threshold.
    Silence,
}

/// Classifies a block of samples against an energy threshold.
///
/// Pure function of one block; O(block length).
pub fn classify(samples: &[f32], threshold: f32) -> EnergyLabel {
    if mean_abs_amplitude(samples) > threshold {
        EnergyLabel::Speech
    } else {
        EnergyLabel::Silence
    }
}

/// Mean absolute amplitude of a sample slice.
///
/// # Returns
/// A value in [0.0, 1.0] for normalized input, where 0.0 is silence and
/// 1.0 is a constant full-scale signal. Empty input yields 0.0.
pub fn mean_abs_amplitude(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum: f64 = samples.iter().map(|&s| s.abs() as f64).sum();
    (sum / samples.len() as f64) as f32
}
