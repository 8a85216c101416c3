//! Streaming pipelines wiring sources, segmentation, transcription, and sinks.

pub mod feeder;
pub mod sink;
pub mod utterance;
pub mod windowed;

pub use feeder::{BlockFeeder, FeederHandle};
pub use sink::{
    CollectorSink, FanoutSink, FileLogSink, StdoutSink, TranscriptEvent, TranscriptSink,
};
pub use utterance::{UtterancePipeline, UtterancePipelineConfig, UtteranceStats};
pub use windowed::{WindowedPipeline, WindowedPipelineConfig, WindowedStats};
