//! Windowed pipeline: fixed-chunk sliding-window mode.
//!
//! Instead of waiting for silence boundaries, this mode transcribes the most
//! recent `chunk_duration` seconds of audio every `stride` seconds. With a
//! stride shorter than the chunk, consecutive windows overlap and tend to
//! produce near-duplicate transcriptions, so overlapping runs pass each
//! result through the dedup filter before delivery.

use crate::audio::source::BlockSource;
use crate::defaults;
use crate::error::Result;
use crate::pipeline::feeder::{BlockFeeder, FeederHandle};
use crate::pipeline::sink::{TranscriptEvent, TranscriptSink};
use crate::segment::dedup::{DedupConfig, DedupFilter};
use crate::segment::energy::mean_abs_amplitude;
use crate::segment::stride::{StrideConfig, StrideScheduler};
use crate::stt::transcriber::{Transcriber, Transcription};
use crossbeam_channel::RecvTimeoutError;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

/// Configuration for the windowed pipeline.
#[derive(Debug, Clone)]
pub struct WindowedPipelineConfig {
    /// Window geometry in samples.
    pub stride: StrideConfig,
    /// Windows quieter than this mean absolute amplitude are skipped
    /// without calling the transcriber.
    pub energy_floor: f32,
    /// Word-overlap ratio above which an overlapping window is suppressed.
    pub dedup_overlap_ratio: f32,
    /// Channel wait before re-checking the stop flag.
    pub read_timeout: Duration,
}

impl WindowedPipelineConfig {
    /// Builds pipeline settings from the application config.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self {
            stride: StrideConfig::from_secs(
                config.window.chunk_duration_seconds,
                config.window.effective_stride_seconds(),
                config.audio.sample_rate,
            ),
            energy_floor: defaults::WINDOW_ENERGY_FLOOR,
            dedup_overlap_ratio: defaults::DEDUP_OVERLAP_RATIO,
            read_timeout: defaults::READ_TIMEOUT,
        }
    }
}

/// Counters reported after a windowed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowedStats {
    pub blocks_processed: u64,
    pub windows_emitted: u64,
    pub windows_skipped_quiet: u64,
    pub duplicates_suppressed: u64,
    pub transcripts_delivered: u64,
    pub transcription_failures: u64,
}

/// Sliding-window transcription pipeline.
pub struct WindowedPipeline {
    config: WindowedPipelineConfig,
    running: Arc<AtomicBool>,
}

impl WindowedPipeline {
    pub fn new(config: WindowedPipelineConfig) -> Self {
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
    pub fn run<S, T, K>(&self, source: S, transcriber: &T, sink: &mut K) -> Result<WindowedStats>
    where
        S: BlockSource + 'static,
        T: Transcriber,
        K: TranscriptSink,
    {
        let (rx, feeder) = BlockFeeder::start(source, self.running.clone())?;
        let started = Instant::now();
        let mut scheduler = StrideScheduler::new(self.config.stride.clone());
        // Disjoint windows never repeat content, so the filter only exists
        // when windows overlap
        let mut dedup = scheduler.windows_overlap().then(|| {
            DedupFilter::with_config(DedupConfig {
                overlap_ratio: self.config.dedup_overlap_ratio,
            })
        });
        let mut stats = WindowedStats::default();

        loop {
            if !feeder.handle().is_running() {
                break;
            }
            match rx.recv_timeout(self.config.read_timeout) {
                Ok(block) => {
                    stats.blocks_processed += 1;
                    if let Some(window) = scheduler.on_block(&block.samples) {
                        self.emit(
                            &window,
                            block.sample_rate,
                            transcriber,
                            sink,
                            &mut dedup,
                            started,
                            &mut stats,
                        )?;
                    }
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        feeder.join();
        sink.finish()?;
        Ok(stats)
    }

    #[allow(clippy::too_many_arguments)]
    fn emit<T, K>(
        &self,
        window: &[f32],
        sample_rate: u32,
        transcriber: &T,
        sink: &mut K,
        dedup: &mut Option<DedupFilter>,
        started: Instant,
        stats: &mut WindowedStats,
    ) -> Result<()>
    where
        T: Transcriber,
        K: TranscriptSink,
    {
        stats.windows_emitted += 1;

        // Near-silent windows waste an inference call and usually come back
        // as hallucinated filler
        if mean_abs_amplitude(window) < self.config.energy_floor {
            stats.windows_skipped_quiet += 1;
            return Ok(());
        }

        let transcription = match transcriber.transcribe(window, sample_rate) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("transcription failed: {}", e);
                stats.transcription_failures += 1;
                Transcription::empty()
            }
        };

        if transcription.is_empty() {
            return Ok(());
        }

        let text = transcription.text.trim().to_string();
        if let Some(filter) = dedup {
            if !filter.check_and_remember(&text) {
                stats.duplicates_suppressed += 1;
                return Ok(());
            }
        }

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

    /// One 0.5s block at a small test rate to keep vectors light.
    const RATE: u32 = 1000;
    const BLOCK: usize = 500;

    fn config(chunk_secs: f32, stride_secs: f32) -> WindowedPipelineConfig {
        WindowedPipelineConfig {
            stride: StrideConfig::from_secs(chunk_secs, stride_secs, RATE),
            energy_floor: defaults::WINDOW_ENERGY_FLOOR,
            dedup_overlap_ratio: defaults::DEDUP_OVERLAP_RATIO,
            read_timeout: Duration::from_millis(50),
        }
    }

    fn audible_blocks(count: usize) -> Vec<Vec<f32>> {
        vec![vec![0.1; BLOCK]; count]
    }

    #[test]
    fn test_windows_emitted_every_stride() {
        // chunk 2s, stride 1s, 4s of audio: windows fill at 2s, then 3s, 4s
        let source = MockBlockSource::new(audible_blocks(8), RATE);
        let transcriber = MockTranscriber::with_responses(&["alpha one", "beta two", "gamma три"]);
        let mut sink = CollectorSink::new();

        let pipeline = WindowedPipeline::new(config(2.0, 1.0));
        let stats = pipeline.run(source, &transcriber, &mut sink).unwrap();

        assert_eq!(stats.windows_emitted, 3);
        assert_eq!(stats.transcripts_delivered, 3);
        assert_eq!(transcriber.call_count(), 3);
    }

    #[test]
    fn test_quiet_windows_skip_transcriber() {
        let source = MockBlockSource::new(vec![vec![0.0; BLOCK]; 8], RATE);
        let transcriber = MockTranscriber::new("should not appear");
        let mut sink = CollectorSink::new();

        let pipeline = WindowedPipeline::new(config(2.0, 1.0));
        let stats = pipeline.run(source, &transcriber, &mut sink).unwrap();

        assert_eq!(stats.windows_emitted, 3);
        assert_eq!(stats.windows_skipped_quiet, 3);
        assert_eq!(transcriber.call_count(), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_overlapping_windows_deduplicated() {
        // Same transcription every window: only the first survives
        let source = MockBlockSource::new(audible_blocks(10), RATE);
        let transcriber = MockTranscriber::new("the same five words exactly");
        let mut sink = CollectorSink::new();

        let pipeline = WindowedPipeline::new(config(2.0, 1.0));
        let stats = pipeline.run(source, &transcriber, &mut sink).unwrap();

        assert_eq!(stats.windows_emitted, 4);
        assert_eq!(stats.transcripts_delivered, 1);
        assert_eq!(stats.duplicates_suppressed, 3);
        assert_eq!(sink.texts(), vec!["the same five words exactly"]);
    }

    #[test]
    fn test_disjoint_windows_never_deduplicated() {
        // stride == chunk: identical texts still all delivered
        let source = MockBlockSource::new(audible_blocks(8), RATE);
        let transcriber = MockTranscriber::new("repeated verbatim text");
        let mut sink = CollectorSink::new();

        let pipeline = WindowedPipeline::new(config(2.0, 2.0));
        let stats = pipeline.run(source, &transcriber, &mut sink).unwrap();

        assert_eq!(stats.windows_emitted, 2);
        assert_eq!(stats.duplicates_suppressed, 0);
        assert_eq!(sink.texts(), vec![
            "repeated verbatim text",
            "repeated verbatim text"
        ]);
    }

    #[test]
    fn test_transcription_failure_keeps_window_loop_alive() {
        let source = MockBlockSource::new(audible_blocks(8), RATE);
        let transcriber = MockTranscriber::new("ignored").with_failure();
        let mut sink = CollectorSink::new();

        let pipeline = WindowedPipeline::new(config(2.0, 1.0));
        let stats = pipeline.run(source, &transcriber, &mut sink).unwrap();

        assert_eq!(stats.windows_emitted, 3);
        assert_eq!(stats.transcription_failures, 3);
        assert!(sink.is_empty());
    }
}
