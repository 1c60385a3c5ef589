//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Malformed request record: {0}")]
    MalformedRequest(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Section generation failed: {0}")]
    Generation(String),

    #[error("Artifact delivery failed: {0}")]
    Delivery(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(
        "No acceptable section alignment after {attempts} attempts \
         ({matched}/{parsed} sections matched on the last pass)"
    )]
    AttemptsExhausted {
        attempts: u32,
        matched: usize,
        parsed: usize,
    },

    #[error("Malformed transcript: {0}")]
    Transcript(#[from] tsnip_models::TranscriptError),

    #[error("Media error: {0}")]
    Media(#[from] tsnip_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WorkerError {
    pub fn malformed_request(msg: impl Into<String>) -> Self {
        Self::MalformedRequest(msg.into())
    }

    pub fn transcription(msg: impl Into<String>) -> Self {
        Self::Transcription(msg.into())
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    pub fn delivery(msg: impl Into<String>) -> Self {
        Self::Delivery(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if running the request again could succeed.
    ///
    /// Exhausted alignment attempts depend on a non-deterministic generation
    /// step, so a rerun may align; malformed inputs will not fix themselves.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WorkerError::AttemptsExhausted { .. }
                | WorkerError::Generation(_)
                | WorkerError::Delivery(_)
        )
    }
}
