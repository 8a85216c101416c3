//! Transcript delivery.
//!
//! Pipelines hand finished transcriptions to a `TranscriptSink`; the sink
//! decides what to do with them (print, collect, append to a log file).

use crate::error::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A finished transcription leaving the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEvent {
    /// Recognized text, already known to be non-empty.
    pub text: String,
    /// Detected language code, when the transcriber reports one.
    pub language: Option<String>,
    /// Time since the pipeline started.
    pub elapsed: Duration,
}

impl TranscriptEvent {
    pub fn new(text: String, language: Option<String>, elapsed: Duration) -> Self {
        Self {
            text,
            language,
            elapsed,
        }
    }
}

/// Trait for transcript consumers.
pub trait TranscriptSink: Send {
    /// Deliver one transcript event.
    fn deliver(&mut self, event: &TranscriptEvent) -> Result<()>;

    /// Called once after the last event, when the pipeline shuts down.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Sink that prints each transcript to stdout with a session timestamp.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl TranscriptSink for StdoutSink {
    fn deliver(&mut self, event: &TranscriptEvent) -> Result<()> {
        let stamp = format_elapsed(event.elapsed);
        match &event.language {
            Some(lang) => println!("[{}] [{}] {}", stamp, lang, event.text),
            None => println!("[{}] {}", stamp, event.text),
        }
        Ok(())
    }
}

/// Sink that collects events in memory, for tests and batch runs.
#[derive(Debug, Default)]
pub struct CollectorSink {
    events: Vec<TranscriptEvent>,
}

impl CollectorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events delivered so far.
    pub fn events(&self) -> &[TranscriptEvent] {
        &self.events
    }

    /// Just the texts, in delivery order.
    pub fn texts(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl TranscriptSink for CollectorSink {
    fn deliver(&mut self, event: &TranscriptEvent) -> Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}

/// Sink that appends each transcript to a plain-text log file.
///
/// The file is opened lazily on the first event and flushed on every write
/// so a crash loses at most the event in flight.
pub struct FileLogSink {
    path: PathBuf,
    file: Option<std::fs::File>,
}

impl FileLogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: None,
        }
    }

    fn file(&mut self) -> Result<&mut std::fs::File> {
        if self.file.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            self.file = Some(file);
        }
        // Populated just above
        Ok(self.file.as_mut().ok_or_else(|| {
            crate::error::StreamscribeError::Other("log file handle missing".to_string())
        })?)
    }
}

impl TranscriptSink for FileLogSink {
    fn deliver(&mut self, event: &TranscriptEvent) -> Result<()> {
        let stamp = format_elapsed(event.elapsed);
        let line = match &event.language {
            Some(lang) => format!("[{}] [{}] {}\n", stamp, lang, event.text),
            None => format!("[{}] {}\n", stamp, event.text),
        };
        let file = self.file()?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

impl TranscriptSink for Box<dyn TranscriptSink> {
    fn deliver(&mut self, event: &TranscriptEvent) -> Result<()> {
        (**self).deliver(event)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Sink that forwards every event to each of its children in order.
#[derive(Default)]
pub struct FanoutSink {
    children: Vec<Box<dyn TranscriptSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, child: Box<dyn TranscriptSink>) -> Self {
        self.children.push(child);
        self
    }
}

impl TranscriptSink for FanoutSink {
    fn deliver(&mut self, event: &TranscriptEvent) -> Result<()> {
        for child in &mut self.children {
            child.deliver(event)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        for child in &mut self.children {
            child.finish()?;
        }
        Ok(())
    }
}

/// Formats a session offset as `MM:SS.s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs_f64();
    let minutes = (total / 60.0) as u64;
    let seconds = total - minutes as f64 * 60.0;
    format!("{:02}:{:04.1}", minutes, seconds)
}
