//! Error handling for Resona
//!
//! Every failure is surfaced synchronously to the caller; there are no
//! retries anywhere in the crate. Errors fall into three kinds (see
//! [`ErrorKind`]): invalid arguments, I/O failures, and resource
//! failures of the audio backend.

use thiserror::Error;

/// Result type alias for Resona operations
pub type Result<T> = std::result::Result<T, ResonaError>;

/// Broad failure classification
///
/// Invalid arguments abort the call immediately. I/O failures are
/// reported without cleanup of partially written output. Resource
/// failures leave the retry decision (different device, different
/// rate) to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Io,
    Resource,
}

/// Main error type for Resona operations
#[derive(Error, Debug)]
pub enum ResonaError {
    // Argument Errors
    #[error("Length mismatch in {context}: expected {expected}, got {actual}")]
    LengthMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid sort column {column} (valid: 0 = freq, 1 = amp, 2 = phase)")]
    ColumnOutOfRange { column: usize },

    #[error("Unsupported operation: {operation}")]
    Unsupported { operation: String },

    // Table Persistence Errors
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Header mismatch: expected '{expected}', got '{actual}'")]
    HeaderMismatch { expected: String, actual: String },

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Non-numeric cell at line {line}: '{cell}'")]
    NonNumericCell { line: usize, cell: String },

    // Audio Resource Errors
    #[error("No audio output device available")]
    NoOutputDevice,

    #[error("Sample rate {requested} Hz is not supported by the output device")]
    UnsupportedSampleRate { requested: f64 },

    #[error("Player is configured for {configured} channel(s)")]
    WrongChannelCount { configured: usize },

    #[error("Requested duration exceeds queued samples and looping is disabled")]
    DurationExceedsSamples,

    #[error("Audio backend error: {reason}")]
    AudioBackend { reason: String },

    // Analysis Errors
    #[error("FFT error: {reason}")]
    Fft { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResonaError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ResonaError::LengthMismatch { .. } => "LENGTH_MISMATCH",
            ResonaError::ColumnOutOfRange { .. } => "COLUMN_OUT_OF_RANGE",
            ResonaError::Unsupported { .. } => "UNSUPPORTED",
            ResonaError::FileNotFound { .. } => "FILE_NOT_FOUND",
            ResonaError::HeaderMismatch { .. } => "HEADER_MISMATCH",
            ResonaError::MalformedRow { .. } => "MALFORMED_ROW",
            ResonaError::NonNumericCell { .. } => "NON_NUMERIC_CELL",
            ResonaError::NoOutputDevice => "NO_OUTPUT_DEVICE",
            ResonaError::UnsupportedSampleRate { .. } => "UNSUPPORTED_SAMPLE_RATE",
            ResonaError::WrongChannelCount { .. } => "WRONG_CHANNEL_COUNT",
            ResonaError::DurationExceedsSamples => "DURATION_EXCEEDS_SAMPLES",
            ResonaError::AudioBackend { .. } => "AUDIO_BACKEND",
            ResonaError::Fft { .. } => "FFT_ERROR",
            ResonaError::Io(_) => "IO_ERROR",
        }
    }

    /// Classify this error into one of the broad failure kinds
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResonaError::LengthMismatch { .. }
            | ResonaError::ColumnOutOfRange { .. }
            | ResonaError::Unsupported { .. }
            | ResonaError::HeaderMismatch { .. }
            | ResonaError::MalformedRow { .. }
            | ResonaError::NonNumericCell { .. }
            | ResonaError::DurationExceedsSamples
            | ResonaError::WrongChannelCount { .. }
            | ResonaError::Fft { .. } => ErrorKind::InvalidArgument,
            ResonaError::FileNotFound { .. } | ResonaError::Io(_) => ErrorKind::Io,
            ResonaError::NoOutputDevice
            | ResonaError::UnsupportedSampleRate { .. }
            | ResonaError::AudioBackend { .. } => ErrorKind::Resource,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = ResonaError::FileNotFound {
            path: "wave.csv".to_string(),
        };
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_argument_errors_are_invalid_argument() {
        let err = ResonaError::ColumnOutOfRange { column: 5 };
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = ResonaError::Unsupported {
            operation: "exponentiation".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_resource_errors() {
        let err = ResonaError::UnsupportedSampleRate { requested: 96000.0 };
        assert_eq!(err.kind(), ErrorKind::Resource);
        assert_eq!(err.error_code(), "UNSUPPORTED_SAMPLE_RATE");
    }
}
