//! Durable clip request record.
//!
//! Persisted as `request.json` in the request directory. The status field is
//! written only once the request has completed; an absent status means the
//! request is still pending.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Lifecycle state of a clip request.
///
/// There is deliberately no failed terminal state: a request that could not
/// be satisfied stays pending and is simply run again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Request has not completed yet (serialized as absent)
    #[default]
    Pending,
    /// Request completed; outputs were produced and delivered
    Success,
}

impl RequestStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Success => "SUCCESS",
        }
    }

    /// Check if this is the terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Success)
    }

    /// Check if the request is still pending.
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The durable record driving orchestration of one request.
///
/// Created on intake, mutated only by the orchestrator, terminal at
/// `SUCCESS`. Rewritten whole-file; callers must serialize access per
/// request id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipRequest {
    /// Reference to the source video (as supplied at intake)
    pub video_id: String,
    /// Requested output length in seconds (generation hint)
    pub length: f64,
    /// Lifecycle status; absent on the wire while pending
    #[serde(default, skip_serializing_if = "RequestStatus::is_pending")]
    pub status: RequestStatus,
    /// Reference returned by artifact delivery, set on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_ref: Option<String>,
}

impl ClipRequest {
    /// Create a new pending request.
    pub fn new(video_id: impl Into<String>, length: f64) -> Self {
        Self {
            video_id: video_id.into(),
            length,
            status: RequestStatus::Pending,
            delivery_ref: None,
        }
    }

    /// Mark the request complete with its delivery reference.
    pub fn mark_success(&mut self, delivery_ref: impl Into<String>) {
        self.status = RequestStatus::Success;
        self.delivery_ref = Some(delivery_ref.into());
    }
}

/// Derive a stable request id from a video reference.
///
/// First 12 hex characters of the SHA-256 of the reference, so repeated
/// intakes of the same video land in the same request directory.
pub fn derive_request_id(video_ref: &str) -> String {
    let digest = Sha256::digest(video_ref.as_bytes());
    format!("{:x}", digest)[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_status_absent_on_wire() {
        let request = ClipRequest::new("abc123", 15.0);
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("status"));
        assert!(!json.contains("delivery_ref"));
    }

    #[test]
    fn test_absent_status_reads_as_pending() {
        let request: ClipRequest =
            serde_json::from_str(r#"{"video_id": "abc123", "length": 15.0}"#).unwrap();
        assert_eq!(request.status, RequestStatus::Pending);
        assert!(request.delivery_ref.is_none());
    }

    #[test]
    fn test_success_round_trip() {
        let mut request = ClipRequest::new("abc123", 15.0);
        request.mark_success("ref-001");

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""status":"SUCCESS""#));

        let parsed: ClipRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.status, RequestStatus::Success);
        assert!(parsed.status.is_terminal());
        assert_eq!(parsed.delivery_ref.as_deref(), Some("ref-001"));
    }

    #[test]
    fn test_derive_request_id_is_stable() {
        let a = derive_request_id("video-a");
        let b = derive_request_id("video-a");
        let c = derive_request_id("video-b");

        assert_eq!(a.len(), 12);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
    }
}
