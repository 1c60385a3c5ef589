//! Structured request logging utilities.

use tracing::{error, info, warn};

/// Request logger with consistent contextual fields.
///
/// Wraps the lifecycle events of one request (start, progress, completion)
/// so every line carries the request id and processing stage.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    request_id: String,
    stage: String,
}

impl RequestLogger {
    /// Create a logger for a request and processing stage.
    pub fn new(request_id: &str, stage: &str) -> Self {
        Self {
            request_id: request_id.to_string(),
            stage: stage.to_string(),
        }
    }

    /// Log the start of processing.
    pub fn log_start(&self, message: &str) {
        info!(
            request_id = %self.request_id,
            stage = %self.stage,
            "Request started: {}", message
        );
    }

    /// Log a progress update.
    pub fn log_progress(&self, message: &str) {
        info!(
            request_id = %self.request_id,
            stage = %self.stage,
            "Request progress: {}", message
        );
    }

    /// Log a recoverable problem.
    pub fn log_warning(&self, message: &str) {
        warn!(
            request_id = %self.request_id,
            stage = %self.stage,
            "Request warning: {}", message
        );
    }

    /// Log a fatal problem.
    pub fn log_error(&self, message: &str) {
        error!(
            request_id = %self.request_id,
            stage = %self.stage,
            "Request error: {}", message
        );
    }

    /// Log completion.
    pub fn log_completion(&self, message: &str) {
        info!(
            request_id = %self.request_id,
            stage = %self.stage,
            "Request completed: {}", message
        );
    }

    /// Get the request id.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_logger_fields() {
        let logger = RequestLogger::new("abc123def456", "clip_request");
        assert_eq!(logger.request_id(), "abc123def456");
    }
}
