//! Worker configuration.

use std::path::PathBuf;

use tsnip_align::EligibilityGate;

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Directory holding per-request subdirectories
    pub requests_dir: PathBuf,
    /// Symmetric time padding applied around each matched window
    pub buffer_secs: f64,
    /// Maximum generate+match+trim passes per request
    pub max_attempts: u32,
    /// Minimum matched/parsed section ratio for a pass to count as done
    pub min_match_ratio: f64,
    /// Candidate eligibility policy for the matcher
    pub gate: EligibilityGate,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            requests_dir: PathBuf::from("requests"),
            buffer_secs: 0.5,
            max_attempts: 3,
            min_match_ratio: 0.5,
            gate: EligibilityGate::Majority,
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            requests_dir: std::env::var("TSNIP_REQUESTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("requests")),
            buffer_secs: std::env::var("TSNIP_BUFFER_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.5),
            max_attempts: std::env::var("TSNIP_MAX_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            min_match_ratio: std::env::var("TSNIP_MIN_MATCH_RATIO")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.5),
            gate: match std::env::var("TSNIP_MATCH_GATE").as_deref() {
                Ok("subset") => EligibilityGate::Subset,
                _ => EligibilityGate::Majority,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WorkerConfig::default();
        assert_eq!(config.buffer_secs, 0.5);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.min_match_ratio, 0.5);
        assert_eq!(config.gate, EligibilityGate::Majority);
    }
}
