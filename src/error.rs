//! Error types for click-track.
//!
//! Separates configuration errors, which are reported before any audio is
//! produced, from sink errors raised while the track is being written.

use std::fmt;

use crate::config::{MAX_BPM, MAX_DURATION_SECS, MIN_BPM};

/// Error codes identifying each failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Tempo is outside the supported range.
    /// Trigger: `--bpm` or `METRONOME_BPM` below 1 or above 1000.
    InvalidTempo,

    /// Duration does not fit the 32-bit size fields of the header.
    /// Trigger: more than 134217 seconds requested.
    DurationTooLong,

    /// Output destination could not be opened.
    /// Trigger: missing directory, permission denied.
    OutputOpenFailed,

    /// Writing to the output failed partway.
    /// Trigger: disk full, broken pipe, closed stream.
    WriteFailed,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidTempo => "INVALID_TEMPO",
            ErrorCode::DurationTooLong => "DURATION_TOO_LONG",
            ErrorCode::OutputOpenFailed => "OUTPUT_OPEN_FAILED",
            ErrorCode::WriteFailed => "WRITE_FAILED",
        }
    }

    /// Returns a recovery hint suggesting how to resolve this error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCode::InvalidTempo => "Pass a tempo between 1 and 1000 (e.g., --bpm 120)",
            ErrorCode::DurationTooLong => {
                "Use a shorter duration, or --duration 0 for continuous play"
            }
            ErrorCode::OutputOpenFailed => {
                "Check that the parent directory exists and is writable, \
                 or omit --output-file to write to standard output"
            }
            ErrorCode::WriteFailed => {
                "Check free disk space, or make sure the reading end of the pipe stays open"
            }
        }
    }

    /// Returns true for errors raised before synthesis starts.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ErrorCode::InvalidTempo | ErrorCode::DurationTooLong)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for click track generation.
#[derive(Debug)]
pub struct MetronomeError {
    /// The error code identifying the type of error.
    pub code: ErrorCode,
    /// Human-readable error message with context.
    pub message: String,
    /// Optional underlying cause of the error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl MetronomeError {
    /// Creates a new MetronomeError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new MetronomeError with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an INVALID_TEMPO error.
    pub fn invalid_tempo(bpm: u32) -> Self {
        Self::new(
            ErrorCode::InvalidTempo,
            format!(
                "Supplied bpm ({}) not in the range [{}, {}]",
                bpm, MIN_BPM, MAX_BPM
            ),
        )
    }

    /// Creates a DURATION_TOO_LONG error.
    pub fn duration_too_long(duration: u32) -> Self {
        Self::new(
            ErrorCode::DurationTooLong,
            format!(
                "Duration too long: {} seconds (maximum {})",
                duration, MAX_DURATION_SECS
            ),
        )
    }

    /// Creates an OUTPUT_OPEN_FAILED error.
    pub fn output_open_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::with_source(
            ErrorCode::OutputOpenFailed,
            format!("Failed to open output file \"{}\": {}", path.into(), source),
            source,
        )
    }

    /// Creates a WRITE_FAILED error.
    pub fn write_failed(what: &str, source: std::io::Error) -> Self {
        Self::with_source(
            ErrorCode::WriteFailed,
            format!("Failed to write {}: {}", what, source),
            source,
        )
    }

    /// Returns the underlying I/O error kind, if this error wraps one.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        self.source
            .as_ref()
            .and_then(|e| e.downcast_ref::<std::io::Error>())
            .map(|e| e.kind())
    }
}

impl fmt::Display for MetronomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}. Recovery: {}",
            self.code,
            self.message,
            self.code.recovery_hint()
        )
    }
}

impl std::error::Error for MetronomeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias using MetronomeError.
pub type Result<T> = std::result::Result<T, MetronomeError>;
