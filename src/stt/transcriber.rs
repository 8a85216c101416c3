use crate::error::{Result, StreamscribeError};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Result of transcribing one utterance or window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcription {
    /// Recognized text; empty means "no speech recognized" and is a normal
    /// outcome, not an error.
    pub text: String,
    /// Detected language tag, when the engine reports one.
    pub language: Option<String>,
}

impl Transcription {
    /// A result carrying no recognized speech.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            language: None,
        }
    }

    /// True when no speech was recognized.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Trait for speech-to-text transcription.
///
/// This trait allows swapping implementations (real inference engine vs mock).
/// Calls are synchronous and may be slow; the pipeline absorbs failures at
/// the call site rather than aborting.
pub trait Transcriber: Send + Sync {
    /// Transcribe audio samples to text.
    ///
    /// # Arguments
    /// * `samples` - Mono float samples in [-1.0, 1.0]
    /// * `sample_rate` - Sample rate in Hz
    fn transcribe(&self, samples: &[f32], sample_rate: u32) -> Result<Transcription>;

    /// Check if the transcriber is ready.
    fn is_ready(&self) -> bool;
}

/// Implement Transcriber for Arc<T> to allow sharing across threads.
impl<T: Transcriber> Transcriber for Arc<T> {
    fn transcribe(&self, samples: &[f32], sample_rate: u32) -> Result<Transcription> {
        (**self).transcribe(samples, sample_rate)
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

/// Stand-in transcriber that reports audio statistics instead of text.
///
/// No inference engine ships with this crate; the binary uses this probe so
/// segmentation behavior can be inspected and thresholds tuned against real
/// recordings. Each segment transcribes to a bracketed summary line.
#[derive(Debug, Default)]
pub struct ProbeTranscriber;

impl ProbeTranscriber {
    pub fn new() -> Self {
        Self
    }
}

impl Transcriber for ProbeTranscriber {
    fn transcribe(&self, samples: &[f32], sample_rate: u32) -> Result<Transcription> {
        let duration = samples.len() as f32 / sample_rate as f32;
        let mean = crate::segment::energy::mean_abs_amplitude(samples);
        let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        Ok(Transcription {
            text: format!(
                "[segment {:.1}s, mean {:.4}, peak {:.3}]",
                duration, mean, peak
            ),
            language: None,
        })
    }

    fn is_ready(&self) -> bool {
        true
    }
}

/// Mock transcriber for testing
#[derive(Debug)]
pub struct MockTranscriber {
    responses: Vec<Transcription>,
    call_count: AtomicUsize,
    should_fail: bool,
}

impl MockTranscriber {
    /// Create a mock that always returns the given text.
    pub fn new(text: &str) -> Self {
        Self {
            responses: vec![Transcription {
                text: text.to_string(),
                language: Some("en".to_string()),
            }],
            call_count: AtomicUsize::new(0),
            should_fail: false,
        }
    }

    /// Create a mock that cycles through the given texts, one per call.
    pub fn with_responses(texts: &[&str]) -> Self {
        Self {
            responses: texts
                .iter()
                .map(|t| Transcription {
                    text: t.to_string(),
                    language: Some("en".to_string()),
                })
                .collect(),
            call_count: AtomicUsize::new(0),
            should_fail: false,
        }
    }

    /// Configure the mock to fail on transcribe.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Number of transcribe calls made so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Transcriber for MockTranscriber {
    fn transcribe(&self, _samples: &[f32], _sample_rate: u32) -> Result<Transcription> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(StreamscribeError::Transcription {
                message: "mock transcription failure".to_string(),
            });
        }
        if self.responses.is_empty() {
            return Ok(Transcription::empty());
        }
        Ok(self.responses[call % self.responses.len()].clone())
    }

    fn is_ready(&self) -> bool {
        !self.should_fail
    }
}
