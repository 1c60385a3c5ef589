//! Collaborator capability traits.
//!
//! Transcription, section generation and artifact delivery are external to
//! this system. The orchestrator only depends on these traits, so the whole
//! pipeline can be exercised with deterministic stand-ins; default adapters
//! live in [`crate::external`]. The media-cutting capability is the fourth
//! seam and lives in `tsnip_media::Cutter`.

use std::path::Path;

use async_trait::async_trait;

use crate::error::WorkerResult;

/// Produces a word-level timestamped transcript file for a video.
///
/// Long-running, blocking call. The produced file is a durable artifact:
/// the orchestrator reuses it across attempts and never regenerates one
/// that already exists.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, video: &Path, transcript: &Path) -> WorkerResult<()>;
}

/// Proposes section descriptions for a transcript.
///
/// `avg_word_duration` is a pacing hint for the generation step only; it
/// plays no part in matching. The returned free text is scanned for
/// `Section <N>: "<phrase>"` occurrences. Generation is non-deterministic:
/// each retry pass calls this again for a fresh proposal.
#[async_trait]
pub trait SectionGenerator: Send + Sync {
    async fn generate(
        &self,
        transcript_text: &str,
        avg_word_duration: f64,
        target_length_secs: f64,
    ) -> WorkerResult<String>;
}

/// Delivers a finished output directory, returning a remote reference.
#[async_trait]
pub trait ArtifactDelivery: Send + Sync {
    async fn deliver(&self, output_dir: &Path) -> WorkerResult<String>;
}
