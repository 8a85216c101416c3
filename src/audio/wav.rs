//! WAV file block source for offline runs.
//!
//! Replays a WAV file through the pipeline as if it were live capture,
//! converting to mono float samples in fixed-size blocks.

use crate::audio::block::AudioBlock;
use crate::audio::source::BlockSource;
use crate::error::{Result, StreamscribeError};
use std::io::Read;
use std::time::Duration;

/// Block source that reads from WAV file data.
///
/// Supports 16-bit integer and 32-bit float WAV in mono or stereo; stereo is
/// downmixed by averaging. The file's own sample rate is carried on the
/// emitted blocks.
pub struct WavBlockSource {
    samples: Vec<f32>,
    sample_rate: u32,
    position: usize,
    block_len: usize,
    sequence: u64,
}

impl WavBlockSource {
    /// Create from any reader (for testing/flexibility).
    ///
    /// `block_duration_secs` controls how much audio each emitted block holds.
    pub fn from_reader(reader: Box<dyn Read + Send>, block_duration_secs: f32) -> Result<Self> {
        let mut wav_reader = hound::WavReader::new(reader)?;
        let spec = wav_reader.spec();
        let channels = spec.channels as usize;

        let raw: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => wav_reader
                .samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => {
                if spec.bits_per_sample != 16 {
                    return Err(StreamscribeError::AudioFormat {
                        message: format!(
                            "unsupported bit depth: {} (expected 16-bit int or 32-bit float)",
                            spec.bits_per_sample
                        ),
                    });
                }
                wav_reader
                    .samples::<i16>()
                    .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
                    .collect::<std::result::Result<Vec<_>, _>>()?
            }
        };

        // Downmix to mono by averaging channels
        let samples = if channels > 1 {
            raw.chunks_exact(channels)
                .map(|frame| frame.iter().sum::<f32>() / channels as f32)
                .collect()
        } else {
            raw
        };

        let block_len = ((block_duration_secs * spec.sample_rate as f32) as usize).max(1);

        Ok(Self {
            samples,
            sample_rate: spec.sample_rate,
            position: 0,
            block_len,
            sequence: 0,
        })
    }

    /// Create from a file path.
    pub fn from_path(path: &std::path::Path, block_duration_secs: f32) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(Box::new(std::io::BufReader::new(file)), block_duration_secs)
    }

    /// Sample rate of the decoded audio.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Total duration of the decoded audio in seconds.
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

impl BlockSource for WavBlockSource {
    fn start(&mut self) -> Result<()> {
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        Ok(())
    }

    fn read(&mut self, _timeout: Duration) -> Result<Option<AudioBlock>> {
        if self.position >= self.samples.len() {
            return Ok(None);
        }

        let end = std::cmp::min(self.position + self.block_len, self.samples.len());
        let chunk = self.samples[self.position..end].to_vec();
        self.position = end;

        let seq = self.sequence;
        self.sequence += 1;
        Ok(Some(AudioBlock::new(seq, chunk, self.sample_rate)))
    }

    fn is_exhausted(&self) -> bool {
        self.position >= self.samples.len()
    }
}
