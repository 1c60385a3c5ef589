//! Request directory layout and record persistence.
//!
//! One request lives in `<requests_dir>/<request_id>/` holding
//! `request.json`, `video.mp4`, `transcript.json`, `sections.txt` and the
//! `<request_id>_output/` directory of produced clips. The record is read at
//! attempt start and rewritten whole-file at completion; there is no partial
//! update and no atomic rename, so access must be serialized per request id.

use std::path::{Path, PathBuf};

use tsnip_models::ClipRequest;

use crate::error::{WorkerError, WorkerResult};

/// Well-known paths inside one request directory.
#[derive(Debug, Clone)]
pub struct RequestPaths {
    request_id: String,
    dir: PathBuf,
}

impl RequestPaths {
    /// Paths for a request under the given requests directory.
    pub fn new(requests_dir: &Path, request_id: &str) -> Self {
        Self {
            request_id: request_id.to_string(),
            dir: requests_dir.join(request_id),
        }
    }

    /// The request directory itself.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The request id.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// The durable request record.
    pub fn request_file(&self) -> PathBuf {
        self.dir.join("request.json")
    }

    /// The source video.
    pub fn video_file(&self) -> PathBuf {
        self.dir.join("video.mp4")
    }

    /// The word-level transcript (durable once produced).
    pub fn transcript_file(&self) -> PathBuf {
        self.dir.join("transcript.json")
    }

    /// The raw generated text of the latest attempt.
    pub fn sections_file(&self) -> PathBuf {
        self.dir.join("sections.txt")
    }

    /// The per-request output directory of produced clips.
    pub fn output_dir(&self) -> PathBuf {
        self.dir.join(format!("{}_output", self.request_id))
    }

    /// Output path for the clip of one section ordinal.
    pub fn clip_file(&self, ordinal: usize) -> PathBuf {
        self.output_dir().join(format!("section_{}.mp4", ordinal))
    }
}

/// Read the request record.
///
/// An unparsable record is fatal for the request and is not retried.
pub async fn load_request(path: &Path) -> WorkerResult<ClipRequest> {
    let content = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&content)
        .map_err(|e| WorkerError::malformed_request(format!("{}: {}", path.display(), e)))
}

/// Rewrite the request record (whole-file replace).
pub async fn save_request(path: &Path, request: &ClipRequest) -> WorkerResult<()> {
    let json = serde_json::to_string_pretty(request)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsnip_models::RequestStatus;

    #[test]
    fn test_layout() {
        let paths = RequestPaths::new(Path::new("/data/requests"), "abc123def456");

        assert_eq!(
            paths.request_file(),
            Path::new("/data/requests/abc123def456/request.json")
        );
        assert_eq!(
            paths.output_dir(),
            Path::new("/data/requests/abc123def456/abc123def456_output")
        );
        assert_eq!(
            paths.clip_file(2),
            Path::new("/data/requests/abc123def456/abc123def456_output/section_2.mp4")
        );
    }

    #[tokio::test]
    async fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");

        let mut request = ClipRequest::new("video-1", 15.0);
        save_request(&path, &request).await.unwrap();
        let loaded = load_request(&path).await.unwrap();
        assert_eq!(loaded.status, RequestStatus::Pending);

        request.mark_success("ref-1");
        save_request(&path, &request).await.unwrap();
        let loaded = load_request(&path).await.unwrap();
        assert_eq!(loaded.status, RequestStatus::Success);
        assert_eq!(loaded.delivery_ref.as_deref(), Some("ref-1"));
    }

    #[tokio::test]
    async fn test_unparsable_record_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let err = load_request(&path).await.unwrap_err();
        assert!(matches!(err, WorkerError::MalformedRequest(_)));
    }
}
