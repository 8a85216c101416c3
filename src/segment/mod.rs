//! Core segmentation and windowing engine.
//!
//! Converts an unbounded sequence of fixed-size audio blocks into a bounded
//! sequence of transcription-ready spans, either as silence-bounded
//! utterances (VAD mode) or as fixed-stride sliding windows with duplicate
//! suppression (stride mode).

pub mod dedup;
pub mod energy;
pub mod segmenter;
pub mod stride;
pub mod window;

pub use dedup::{DedupConfig, DedupFilter};
pub use energy::{EnergyLabel, classify, mean_abs_amplitude};
pub use segmenter::{SegmentationState, SegmenterConfig, Utterance, UtteranceSegmenter};
pub use stride::{StrideConfig, StrideScheduler};
pub use window::SlidingWindowBuffer;
