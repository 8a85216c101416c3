//! streamscribe - Streaming speech segmentation and transcription
//!
//! Cuts a continuous audio stream into transcription-ready spans, either as
//! silence-bounded utterances or as fixed-stride sliding windows, and drives
//! them through a pluggable transcriber to pluggable sinks.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod answer;
pub mod audio;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod segment;
pub mod stt;

// Core traits (source → segment → transcribe → sink)
pub use audio::source::BlockSource;
pub use pipeline::sink::{CollectorSink, FileLogSink, StdoutSink, TranscriptSink};
pub use stt::transcriber::Transcriber;

// Pipelines
pub use pipeline::utterance::{UtterancePipeline, UtterancePipelineConfig};
pub use pipeline::windowed::{WindowedPipeline, WindowedPipelineConfig};

// Error handling
pub use error::{Result, StreamscribeError};

// Config
pub use config::Config;
