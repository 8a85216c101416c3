//! Error types for streamscribe.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StreamscribeError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Audio source errors
    #[error("Audio source failed: {message}")]
    AudioSource { message: String },

    #[error("Unsupported audio format: {message}")]
    AudioFormat { message: String },

    #[error("WAV decode error: {0}")]
    WavDecode(#[from] hound::Error),

    // Transcription errors
    #[error("Transcription failed: {message}")]
    Transcription { message: String },

    // Answer generation errors
    #[error("Answer generation failed: {message}")]
    AnswerGeneration { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, StreamscribeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_config_file_not_found_display() {
        let error = StreamscribeError::ConfigFileNotFound {
            path: "/path/to/config.toml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found at /path/to/config.toml"
        );
    }

    #[test]
    fn test_config_invalid_value_display() {
        let error = StreamscribeError::ConfigInvalidValue {
            key: "stride_seconds".to_string(),
            message: "must be positive".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value for stride_seconds: must be positive"
        );
    }

    #[test]
    fn test_audio_source_display() {
        let error = StreamscribeError::AudioSource {
            message: "device disconnected".to_string(),
        };
        assert_eq!(error.to_string(), "Audio source failed: device disconnected");
    }

    #[test]
    fn test_transcription_display() {
        let error = StreamscribeError::Transcription {
            message: "inference backend unavailable".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Transcription failed: inference backend unavailable"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: StreamscribeError = io_error.into();
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_toml_error() {
        let toml_str = "invalid = toml = syntax";
        let toml_error = toml::from_str::<toml::Value>(toml_str).unwrap_err();
        let error: StreamscribeError = toml_error.into();
        assert!(error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_error_source_chain_io() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: StreamscribeError = io_error.into();

        let error_trait: &dyn std::error::Error = &error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<StreamscribeError>();
        assert_sync::<StreamscribeError>();
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }
}
