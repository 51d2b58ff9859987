//! Error types for recording operations.

use thiserror::Error;

/// Result type for recording operations.
pub type RecordingResult<T> = Result<T, RecordingError>;

/// Errors that can occur while encoding or committing recordings.
#[derive(Debug, Error)]
pub enum RecordingError {
    /// No samples or frames were supplied.
    #[error("empty input: {what} contains no data")]
    EmptyInput {
        /// What was empty ("pcm", "face sequence", ...).
        what: &'static str,
    },

    /// A parameter is out of range.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Bytes handed to the WAV decoder are not a canonical 16-bit PCM container.
    #[error("invalid WAV data: {message}")]
    InvalidWav {
        /// Error message.
        message: String,
    },

    /// The underlying writer or asset could not be created.
    #[error("failed to create '{target}': {message}")]
    SinkCreation {
        /// File path or asset name.
        target: String,
        /// Error message.
        message: String,
    },

    /// The second artifact of a pair failed after the first was committed.
    #[error(
        "'{failed}' failed after '{committed}' was committed ({}): {source}",
        rollback_note(.rolled_back)
    )]
    PartialCommit {
        /// Identifier of the artifact that had been committed.
        committed: String,
        /// Identifier of the artifact that failed.
        failed: String,
        /// Whether the committed artifact was removed again.
        rolled_back: bool,
        /// Why the second artifact failed.
        #[source]
        source: Box<RecordingError>,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn rollback_note(rolled_back: &bool) -> &'static str {
    if *rolled_back {
        "rolled back"
    } else {
        "rollback failed"
    }
}

impl RecordingError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid WAV error.
    pub fn invalid_wav(message: impl Into<String>) -> Self {
        Self::InvalidWav {
            message: message.into(),
        }
    }

    /// Creates a sink creation error.
    pub fn sink_creation(target: impl Into<String>, message: impl ToString) -> Self {
        Self::SinkCreation {
            target: target.into(),
            message: message.to_string(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            RecordingError::EmptyInput { .. } => "REC_001",
            RecordingError::InvalidParameter { .. } => "REC_002",
            RecordingError::InvalidWav { .. } => "REC_003",
            RecordingError::SinkCreation { .. } => "REC_004",
            RecordingError::PartialCommit { .. } => "REC_005",
            RecordingError::Io(_) => "REC_006",
            RecordingError::Json(_) => "REC_007",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_invalid_param_helper() {
        let err = RecordingError::invalid_param("channels", "must be positive");
        assert!(err.to_string().contains("channels"));
        assert!(err.to_string().contains("must be positive"));
        assert_eq!(err.code(), "REC_002");
    }

    #[test]
    fn test_partial_commit_message() {
        let err = RecordingError::PartialCommit {
            committed: "take.wav".to_string(),
            failed: "take.json".to_string(),
            rolled_back: true,
            source: Box::new(RecordingError::sink_creation("take.json", "disk full")),
        };
        let message = err.to_string();
        assert!(message.contains("take.wav"));
        assert!(message.contains("rolled back"));
        assert!(message.contains("disk full"));
        assert_eq!(err.code(), "REC_005");
    }

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            RecordingError::EmptyInput { what: "pcm" },
            RecordingError::invalid_param("x", "y"),
            RecordingError::invalid_wav("short"),
            RecordingError::sink_creation("a", "b"),
            RecordingError::PartialCommit {
                committed: "a".to_string(),
                failed: "b".to_string(),
                rolled_back: true,
                source: Box::new(RecordingError::invalid_wav("c")),
            },
            RecordingError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom")),
            RecordingError::Json(serde_json::from_str::<u32>("x").unwrap_err()),
        ];
        let codes: HashSet<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), errors.len());
    }
}
