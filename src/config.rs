use crate::defaults;
use crate::error::StreamscribeError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub vad: VadConfig,
    pub window: WindowConfig,
    pub stt: SttConfig,
}

/// Audio stream configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub sample_rate: u32,
    /// Nominal block length in seconds as delivered by the source.
    pub block_duration_seconds: f32,
}

/// Utterance segmentation (VAD mode) configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VadConfig {
    pub energy_threshold: f32,
    pub silence_duration_seconds: f32,
    pub min_speech_duration_seconds: f32,
}

/// Sliding-window (stride mode) configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub chunk_duration_seconds: f32,
    /// Stride between window extractions. Defaults to the chunk duration
    /// (disjoint windows) when unset.
    pub stride_seconds: Option<f32>,
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SttConfig {
    pub language: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: defaults::SAMPLE_RATE,
            block_duration_seconds: 0.5,
        }
    }
}

impl Default for VadConfig {
    fn default() -> Self {
        Self {
            energy_threshold: defaults::ENERGY_THRESHOLD,
            silence_duration_seconds: defaults::SILENCE_DURATION_SECS,
            min_speech_duration_seconds: defaults::MIN_SPEECH_DURATION_SECS,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            chunk_duration_seconds: defaults::CHUNK_DURATION_SECS,
            stride_seconds: Some(defaults::STRIDE_SECS),
        }
    }
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            language: defaults::DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl WindowConfig {
    /// Effective stride in seconds (chunk duration when unset).
    pub fn effective_stride_seconds(&self) -> f32 {
        self.stride_seconds.unwrap_or(self.chunk_duration_seconds)
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file is missing or contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Err(StreamscribeError::ConfigFileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => match e.downcast_ref::<StreamscribeError>() {
                Some(StreamscribeError::ConfigFileNotFound { .. }) => Ok(Self::default()),
                _ => Err(e),
            },
        }
    }

    /// Rejects parameter values the pipelines cannot run with.
    pub fn validate(&self) -> crate::error::Result<()> {
        fn positive(key: &str, value: f32) -> crate::error::Result<()> {
            if value > 0.0 {
                Ok(())
            } else {
                Err(StreamscribeError::ConfigInvalidValue {
                    key: key.to_string(),
                    message: format!("must be positive, got {}", value),
                })
            }
        }

        if self.audio.sample_rate == 0 {
            return Err(StreamscribeError::ConfigInvalidValue {
                key: "audio.sample_rate".to_string(),
                message: "must be positive".to_string(),
            });
        }
        positive(
            "audio.block_duration_seconds",
            self.audio.block_duration_seconds,
        )?;
        if self.vad.energy_threshold < 0.0 {
            return Err(StreamscribeError::ConfigInvalidValue {
                key: "vad.energy_threshold".to_string(),
                message: format!("must not be negative, got {}", self.vad.energy_threshold),
            });
        }
        positive(
            "vad.silence_duration_seconds",
            self.vad.silence_duration_seconds,
        )?;
        positive(
            "vad.min_speech_duration_seconds",
            self.vad.min_speech_duration_seconds,
        )?;
        positive(
            "window.chunk_duration_seconds",
            self.window.chunk_duration_seconds,
        )?;
        positive(
            "window.stride_seconds",
            self.window.effective_stride_seconds(),
        )?;
        Ok(())
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - STREAMSCRIBE_LANGUAGE → stt.language
    /// - STREAMSCRIBE_ENERGY_THRESHOLD → vad.energy_threshold
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(language) = std::env::var("STREAMSCRIBE_LANGUAGE")
            && !language.is_empty()
        {
            self.stt.language = language;
        }

        if let Ok(threshold) = std::env::var("STREAMSCRIBE_ENERGY_THRESHOLD")
            && let Ok(value) = threshold.parse::<f32>()
        {
            self.vad.energy_threshold = value;
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/streamscribe/config.toml on Linux
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("streamscribe").join("config.toml"))
    }
}
