//! Speech-to-text interface.

pub mod transcriber;

pub use transcriber::{MockTranscriber, ProbeTranscriber, Transcriber, Transcription};
