//! Lossless clip extraction over a time range.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Media-cutting capability.
///
/// Abstracts the external cut invocation so orchestration can be exercised
/// with a deterministic stand-in. [`StreamCopyCutter`] is the FFmpeg
/// implementation.
#[async_trait]
pub trait Cutter: Send + Sync {
    /// Cut the `[start_secs, end_secs]` range of `source` into `output`.
    async fn cut(
        &self,
        source: &Path,
        start_secs: f64,
        end_secs: f64,
        output: &Path,
    ) -> MediaResult<()>;
}

/// FFmpeg stream-copy cutter (no re-encoding).
#[derive(Debug, Clone, Default)]
pub struct StreamCopyCutter;

impl StreamCopyCutter {
    /// Create a new cutter.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Cutter for StreamCopyCutter {
    async fn cut(
        &self,
        source: &Path,
        start_secs: f64,
        end_secs: f64,
        output: &Path,
    ) -> MediaResult<()> {
        extract_clip(source, output, start_secs, end_secs).await
    }
}

/// Extract a clip from a video file without re-encoding.
///
/// An existing output file is removed first, so re-running with the same
/// inputs replaces the clip rather than erroring; output files are never
/// appended to or merged.
pub async fn extract_clip(
    source: impl AsRef<Path>,
    output: impl AsRef<Path>,
    start_secs: f64,
    end_secs: f64,
) -> MediaResult<()> {
    let source = source.as_ref();
    let output = output.as_ref();

    if start_secs >= end_secs {
        return Err(MediaError::InvalidRange {
            start: start_secs,
            end: end_secs,
        });
    }

    info!(
        "Extracting clip: {} -> {} ({:.3}s..{:.3}s)",
        source.display(),
        output.display(),
        start_secs,
        end_secs
    );

    remove_existing_output(output).await?;

    let cmd = FfmpegCommand::new(source, output)
        .seek(start_secs)
        .stop_at(end_secs)
        .codec_copy();

    FfmpegRunner::new().run(&cmd).await?;

    info!("Clip extracted: {}", output.display());
    Ok(())
}

/// Delete-then-recreate semantics for the output path.
async fn remove_existing_output(output: &Path) -> MediaResult<()> {
    if tokio::fs::try_exists(output).await? {
        tokio::fs::remove_file(output).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_remove_existing_output_deletes_stale_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("section_0.mp4");
        tokio::fs::write(&output, b"stale clip").await.unwrap();

        remove_existing_output(&output).await.unwrap();
        assert!(!output.exists());

        // Removing an absent file is not an error.
        remove_existing_output(&output).await.unwrap();
    }

    #[tokio::test]
    async fn test_inverted_range_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_clip(
            dir.path().join("in.mp4"),
            dir.path().join("out.mp4"),
            2.0,
            1.0,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, MediaError::InvalidRange { .. }));
    }
}
