//! Utterance pipeline: silence-gated segmentation mode.
//!
//! Blocks flow from the feeder channel through the energy classifier and the
//! utterance segmenter; each finished utterance is transcribed synchronously
//! and delivered to the sink. A transcription failure is absorbed at the
//! call site (logged and treated as an empty result) so the loop keeps
//! consuming audio.

use crate::audio::source::BlockSource;
use crate::defaults;
use crate::error::Result;
use crate::pipeline::feeder::{BlockFeeder, FeederHandle};
use crate::pipeline::sink::{TranscriptEvent, TranscriptSink};
use crate::segment::energy::classify;
use crate::segment::segmenter::{SegmenterConfig, Utterance, UtteranceSegmenter};
use crate::stt::transcriber::{Transcriber, Transcription};
use crossbeam_channel::RecvTimeoutError;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

/// Configuration for the utterance pipeline.
#[derive(Debug, Clone)]
pub struct UtterancePipelineConfig {
    /// Mean-absolute-amplitude threshold separating speech from silence.
    pub energy_threshold: f32,
    /// Segmenter timing parameters.
    pub segmenter: SegmenterConfig,
    /// How long the consumer waits on the channel before re-checking the
    /// stop flag.
    pub read_timeout: Duration,
}

impl Default for UtterancePipelineConfig {
    fn default() -> Self {
        Self {
            energy_threshold: defaults::ENERGY_THRESHOLD,
            segmenter: SegmenterConfig::default(),
            read_timeout: defaults::READ_TIMEOUT,
        }
    }
}

impl UtterancePipelineConfig {
    /// Builds pipeline settings from the application config.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self {
            energy_threshold: config.vad.energy_threshold,
            segmenter: SegmenterConfig {
                sample_rate: config.audio.sample_rate,
                silence_duration_secs: config.vad.silence_duration_seconds,
                min_speech_duration_secs: config.vad.min_speech_duration_seconds,
            },
            read_timeout: defaults::READ_TIMEOUT,
        }
    }
}

/// Counters reported after a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtteranceStats {
    pub blocks_processed: u64,
    pub utterances_detected: u64,
    pub transcripts_delivered: u64,
    pub transcription_failures: u64,
}

/// Silence-gated segmentation pipeline.
pub struct UtterancePipeline {
    config: UtterancePipelineConfig,
    running: Arc<AtomicBool>,
}

impl UtterancePipeline {
    pub fn new(config: UtterancePipelineConfig) -> Self {
        Self {
            config,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns a handle that can stop a running pipeline from another thread.
    pub fn handle(&self) -> FeederHandle {
        FeederHandle::new(self.running.clone())
    }

    /// Runs the pipeline until the source is exhausted or the handle stops it.
    ///
    /// Blocks the calling thread. On shutdown any buffered speech is flushed
    /// through the segmenter so trailing audio is not lost.
    pub fn run<S, T, K>(&self, source: S, transcriber: &T, sink: &mut K) -> Result<UtteranceStats>
    where
        S: BlockSource + 'static,
        T: Transcriber,
        K: TranscriptSink,
    {
        let (rx, feeder) = BlockFeeder::start(source, self.running.clone())?;
        let started = Instant::now();
        let mut segmenter = UtteranceSegmenter::new(self.config.segmenter.clone());
        let mut stats = UtteranceStats::default();

        loop {
            if !feeder.handle().is_running() {
                break;
            }
            match rx.recv_timeout(self.config.read_timeout) {
                Ok(block) => {
                    stats.blocks_processed += 1;
                    let label = classify(&block.samples, self.config.energy_threshold);
                    if let Some(utterance) = segmenter.step(&block, label) {
                        self.emit(&utterance, transcriber, sink, started, &mut stats)?;
                    }
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    if let Some(utterance) = segmenter.flush() {
                        self.emit(&utterance, transcriber, sink, started, &mut stats)?;
                    }
                    break;
                }
            }
        }

        feeder.join();
        sink.finish()?;
        Ok(stats)
    }

    fn emit<T, K>(
        &self,
        utterance: &Utterance,
        transcriber: &T,
        sink: &mut K,
        started: Instant,
        stats: &mut UtteranceStats,
    ) -> Result<()>
    where
        T: Transcriber,
        K: TranscriptSink,
    {
        stats.utterances_detected += 1;

        let transcription = match transcriber.transcribe(&utterance.samples, utterance.sample_rate)
        {
            Ok(t) => t,
            Err(e) => {
                eprintln!("transcription failed: {}", e);
                stats.transcription_failures += 1;
                Transcription::empty()
            }
        };

        // Empty text is a no-op, not an error
        if transcription.is_empty() {
            return Ok(());
        }

        let text = transcription.text.trim().to_string();
        sink.deliver(&TranscriptEvent::new(
            text,
            transcription.language,
            started.elapsed(),
        ))?;
        stats.transcripts_delivered += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::source::MockBlockSource;
    use crate::pipeline::sink::CollectorSink;
    use crate::stt::transcriber::MockTranscriber;

    /// One 0.5s block at 16 kHz.
    const BLOCK: usize = 8000;

    fn loud() -> Vec<f32> {
        vec![0.5; BLOCK]
    }

    fn quiet() -> Vec<f32> {
        vec![0.0; BLOCK]
    }

    fn test_config() -> UtterancePipelineConfig {
        UtterancePipelineConfig {
            energy_threshold: 0.01,
            segmenter: SegmenterConfig {
                sample_rate: 16000,
                silence_duration_secs: 1.0,
                min_speech_duration_secs: 1.0,
            },
            read_timeout: Duration::from_millis(50),
        }
    }

    #[test]
    fn test_single_utterance_transcribed_and_delivered() {
        // 2s speech then 1.5s silence: silence run closes the utterance
        let blocks = vec![loud(), loud(), loud(), loud(), quiet(), quiet(), quiet()];
        let source = MockBlockSource::new(blocks, 16000);
        let transcriber = MockTranscriber::new("hello world");
        let mut sink = CollectorSink::new();

        let pipeline = UtterancePipeline::new(test_config());
        let stats = pipeline.run(source, &transcriber, &mut sink).unwrap();

        assert_eq!(stats.blocks_processed, 7);
        assert_eq!(stats.utterances_detected, 1);
        assert_eq!(stats.transcripts_delivered, 1);
        assert_eq!(sink.texts(), vec!["hello world"]);
        assert_eq!(transcriber.call_count(), 1);
    }

    #[test]
    fn test_short_utterance_never_reaches_transcriber() {
        // 0.5s of speech plus the 1.0s closing silence is under the 2.5s minimum
        let blocks = vec![quiet(), loud(), quiet(), quiet(), quiet()];
        let source = MockBlockSource::new(blocks, 16000);
        let transcriber = MockTranscriber::new("noise");
        let mut sink = CollectorSink::new();

        let mut config = test_config();
        config.segmenter.min_speech_duration_secs = 2.5;
        let pipeline = UtterancePipeline::new(config);
        let stats = pipeline.run(source, &transcriber, &mut sink).unwrap();

        assert_eq!(stats.utterances_detected, 0);
        assert_eq!(transcriber.call_count(), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_transcription_failure_does_not_stop_pipeline() {
        // Two utterances; the transcriber fails every call
        let blocks = vec![
            loud(),
            loud(),
            loud(),
            quiet(),
            quiet(),
            loud(),
            loud(),
            loud(),
            quiet(),
            quiet(),
        ];
        let source = MockBlockSource::new(blocks, 16000);
        let transcriber = MockTranscriber::new("ignored").with_failure();
        let mut sink = CollectorSink::new();

        let pipeline = UtterancePipeline::new(test_config());
        let stats = pipeline.run(source, &transcriber, &mut sink).unwrap();

        assert_eq!(stats.utterances_detected, 2);
        assert_eq!(stats.transcription_failures, 2);
        assert_eq!(stats.transcripts_delivered, 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_empty_transcription_is_a_no_op() {
        let blocks = vec![loud(), loud(), loud(), quiet(), quiet(), quiet()];
        let source = MockBlockSource::new(blocks, 16000);
        let transcriber = MockTranscriber::new("   ");
        let mut sink = CollectorSink::new();

        let pipeline = UtterancePipeline::new(test_config());
        let stats = pipeline.run(source, &transcriber, &mut sink).unwrap();

        assert_eq!(stats.utterances_detected, 1);
        assert_eq!(stats.transcripts_delivered, 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_trailing_speech_flushed_at_end_of_stream() {
        // Stream ends mid-utterance without a closing silence run
        let blocks = vec![loud(), loud(), loud(), loud()];
        let source = MockBlockSource::new(blocks, 16000);
        let transcriber = MockTranscriber::new("cut off");
        let mut sink = CollectorSink::new();

        let pipeline = UtterancePipeline::new(test_config());
        let stats = pipeline.run(source, &transcriber, &mut sink).unwrap();

        assert_eq!(stats.utterances_detected, 1);
        assert_eq!(sink.texts(), vec!["cut off"]);
    }
}
