//! Default collaborator adapters.
//!
//! These wire the capability traits to the outside world: a configured
//! external command for transcription, an HTTP endpoint for section
//! generation, and a local-path stand-in for delivery. Each stays behind its
//! trait so deployments can swap in their own collaborators.

use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::collab::{ArtifactDelivery, SectionGenerator, Transcriber};
use crate::error::{WorkerError, WorkerResult};

/// Transcriber that spawns a configured external command.
///
/// The command is taken from `TSNIP_TRANSCRIBE_CMD` and invoked as
/// `<program> [args...] <video> <transcript>`; it must leave a word-level
/// transcript JSON at the transcript path.
pub struct CommandTranscriber {
    program: String,
    args: Vec<String>,
}

impl CommandTranscriber {
    /// Create a transcriber for an explicit command line.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Create a transcriber from `TSNIP_TRANSCRIBE_CMD`.
    pub fn from_env() -> WorkerResult<Self> {
        let command = std::env::var("TSNIP_TRANSCRIBE_CMD")
            .map_err(|_| WorkerError::config("TSNIP_TRANSCRIBE_CMD not set"))?;
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| WorkerError::config("TSNIP_TRANSCRIBE_CMD is empty"))?;
        Ok(Self::new(program, parts.collect()))
    }
}

#[async_trait]
impl Transcriber for CommandTranscriber {
    async fn transcribe(&self, video: &Path, transcript: &Path) -> WorkerResult<()> {
        info!(
            "Transcribing {} with {}",
            video.display(),
            self.program
        );

        let output = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(video)
            .arg(transcript)
            .output()
            .await
            .map_err(|e| {
                WorkerError::transcription(format!("failed to run {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(WorkerError::transcription(format!(
                "{} exited with {:?}: {}",
                self.program,
                output.status.code(),
                stderr.trim()
            )));
        }

        if !tokio::fs::try_exists(transcript).await? {
            return Err(WorkerError::transcription(format!(
                "{} produced no transcript at {}",
                self.program,
                transcript.display()
            )));
        }

        info!("Transcript written to {}", transcript.display());
        Ok(())
    }
}

/// Section generator backed by an HTTP endpoint.
///
/// POSTs the transcript text with pacing hints and expects
/// `{"text": "..."}` back; the text is scanned downstream for
/// `Section <N>: "<phrase>"` occurrences.
pub struct HttpSectionGenerator {
    endpoint: String,
    bearer_token: Option<String>,
    client: Client,
}

#[derive(Debug, Serialize)]
struct SectionsRequest<'a> {
    transcript: &'a str,
    avg_word_duration: f64,
    target_length: f64,
}

#[derive(Debug, Deserialize)]
struct SectionsResponse {
    text: String,
}

impl HttpSectionGenerator {
    /// Create a generator for an explicit endpoint.
    pub fn new(endpoint: impl Into<String>, bearer_token: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            bearer_token,
            client: Client::new(),
        }
    }

    /// Create a generator from `TSNIP_SECTIONS_URL` / `TSNIP_SECTIONS_TOKEN`.
    pub fn from_env() -> WorkerResult<Self> {
        let endpoint = std::env::var("TSNIP_SECTIONS_URL")
            .map_err(|_| WorkerError::config("TSNIP_SECTIONS_URL not set"))?;
        let bearer_token = std::env::var("TSNIP_SECTIONS_TOKEN").ok();
        Ok(Self::new(endpoint, bearer_token))
    }
}

#[async_trait]
impl SectionGenerator for HttpSectionGenerator {
    async fn generate(
        &self,
        transcript_text: &str,
        avg_word_duration: f64,
        target_length_secs: f64,
    ) -> WorkerResult<String> {
        debug!(
            avg_word_duration,
            target_length_secs, "Requesting section proposals"
        );

        let mut request = self.client.post(&self.endpoint).json(&SectionsRequest {
            transcript: transcript_text,
            avg_word_duration,
            target_length: target_length_secs,
        });
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| WorkerError::generation(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WorkerError::generation(format!(
                "endpoint returned {}: {}",
                status,
                body.trim()
            )));
        }

        let parsed: SectionsResponse = response
            .json()
            .await
            .map_err(|e| WorkerError::generation(format!("unparsable response: {}", e)))?;

        Ok(parsed.text)
    }
}

/// Delivery stand-in that reports the local output directory.
///
/// Remote delivery is an external collaborator; this default makes the
/// pipeline usable without one by returning the canonical path of the
/// output directory as the reference.
#[derive(Debug, Clone, Default)]
pub struct LocalDelivery;

impl LocalDelivery {
    /// Create a local delivery stand-in.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArtifactDelivery for LocalDelivery {
    async fn deliver(&self, output_dir: &Path) -> WorkerResult<String> {
        let canonical = tokio::fs::canonicalize(output_dir)
            .await
            .map_err(|e| WorkerError::delivery(format!("{}: {}", output_dir.display(), e)))?;
        Ok(canonical.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_transcriber_from_env_splits_program_and_args() {
        // Serialized via the env var name; no other test touches it.
        std::env::set_var("TSNIP_TRANSCRIBE_CMD", "whisper-cli --model medium");
        let transcriber = CommandTranscriber::from_env().unwrap();
        assert_eq!(transcriber.program, "whisper-cli");
        assert_eq!(transcriber.args, vec!["--model", "medium"]);
        std::env::remove_var("TSNIP_TRANSCRIBE_CMD");
    }

    #[tokio::test]
    async fn test_local_delivery_returns_canonical_dir() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("abc_output");
        tokio::fs::create_dir_all(&output_dir).await.unwrap();

        let reference = LocalDelivery::new().deliver(&output_dir).await.unwrap();
        assert!(reference.ends_with("abc_output"));
    }

    #[tokio::test]
    async fn test_local_delivery_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalDelivery::new()
            .deliver(&dir.path().join("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkerError::Delivery(_)));
    }
}
