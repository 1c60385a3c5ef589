//! Request orchestration.
//!
//! Drives one clip request end to end: ensure a transcript exists, obtain
//! section proposals, align each section to the transcript, cut the matched
//! ranges, deliver the output directory and persist the terminal status.
//!
//! The generation step is non-deterministic, so a pass that aligns poorly is
//! retried as a whole (fresh generation included) rather than per section: a
//! new proposal may quote the transcript more closely than the previous one.
//! Retries are bounded and a pass only counts as done once enough of its
//! sections aligned; exhaustion surfaces an error and leaves the request
//! pending, re-runnable later. There is no failed terminal state.

use tracing::{debug, warn};

use tsnip_align::{plan_clip, SectionMatcher};
use tsnip_media::Cutter;
use tsnip_models::{parse_sections, RequestStatus, Transcript};

use crate::collab::{ArtifactDelivery, SectionGenerator, Transcriber};
use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::logging::RequestLogger;
use crate::store::{self, RequestPaths};

/// Coordinates one request across the collaborator seams.
pub struct RequestOrchestrator<T, G, C, D> {
    config: WorkerConfig,
    matcher: SectionMatcher,
    transcriber: T,
    generator: G,
    cutter: C,
    delivery: D,
}

impl<T, G, C, D> RequestOrchestrator<T, G, C, D>
where
    T: Transcriber,
    G: SectionGenerator,
    C: Cutter,
    D: ArtifactDelivery,
{
    /// Create an orchestrator over the given collaborators.
    pub fn new(config: WorkerConfig, transcriber: T, generator: G, cutter: C, delivery: D) -> Self {
        let matcher = SectionMatcher::with_gate(config.gate);
        Self {
            config,
            matcher,
            transcriber,
            generator,
            cutter,
            delivery,
        }
    }

    /// Process one request to completion, returning its delivery reference.
    ///
    /// Idempotent: a request already marked `SUCCESS` with a stored
    /// reference returns that reference without reprocessing.
    pub async fn process(&self, request_id: &str) -> WorkerResult<String> {
        let logger = RequestLogger::new(request_id, "clip_request");
        let paths = RequestPaths::new(&self.config.requests_dir, request_id);

        let mut request = store::load_request(&paths.request_file()).await?;

        if request.status == RequestStatus::Success {
            if let Some(delivery_ref) = request.delivery_ref.clone() {
                logger.log_completion("already delivered");
                return Ok(delivery_ref);
            }
            // Marked done but never delivered: run the pipeline again.
            logger.log_warning("terminal status without delivery reference, reprocessing");
        }

        logger.log_start(&format!(
            "video {} at {:.0}s target length",
            request.video_id, request.length
        ));

        // The transcript is a durable artifact: produced at most once,
        // reused by every later attempt.
        let transcript_file = paths.transcript_file();
        if !tokio::fs::try_exists(&transcript_file).await? {
            logger.log_progress("transcribing source video");
            self.transcriber
                .transcribe(&paths.video_file(), &transcript_file)
                .await?;
        }

        let transcript = Transcript::load(&transcript_file)?;
        let candidates = transcript.segment_tokens();
        let avg_word_duration = transcript.avg_word_duration();

        let output_dir = paths.output_dir();
        tokio::fs::create_dir_all(&output_dir).await?;

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            logger.log_progress(&format!(
                "attempt {}/{}",
                attempt, self.config.max_attempts
            ));

            let generated = self
                .generator
                .generate(&transcript.text, avg_word_duration, request.length)
                .await?;
            tokio::fs::write(paths.sections_file(), &generated).await?;

            let sections = parse_sections(&generated);
            let mut matched = 0usize;

            for section in &sections {
                let target = section.tokens();
                let Some(best) = self.matcher.find_best_window(&target, &candidates) else {
                    debug!(
                        ordinal = section.ordinal,
                        "no acceptable window for section, skipping"
                    );
                    continue;
                };
                matched += 1;

                let Some(plan) = plan_clip(&transcript, &best, self.config.buffer_secs) else {
                    warn!(
                        ordinal = section.ordinal,
                        "matched window does not resolve into the transcript, skipping"
                    );
                    continue;
                };

                // A failed cut loses this section's clip, nothing more.
                let clip_file = paths.clip_file(section.ordinal);
                if let Err(e) = self
                    .cutter
                    .cut(&paths.video_file(), plan.start_secs, plan.end_secs, &clip_file)
                    .await
                {
                    logger.log_warning(&format!(
                        "cut failed for section {}: {}",
                        section.ordinal, e
                    ));
                }
            }

            // Human-readable manifest, written even when nothing matched so
            // an empty output directory is always inspectable.
            tokio::fs::copy(paths.sections_file(), output_dir.join("readme.txt")).await?;

            if !sections.is_empty()
                && matched as f64 / sections.len() as f64 >= self.config.min_match_ratio
            {
                logger.log_progress(&format!(
                    "{}/{} sections matched",
                    matched,
                    sections.len()
                ));
                break;
            }

            if attempt >= self.config.max_attempts {
                return Err(WorkerError::AttemptsExhausted {
                    attempts: attempt,
                    matched,
                    parsed: sections.len(),
                });
            }

            logger.log_warning(&format!(
                "{}/{} sections matched, regenerating",
                matched,
                sections.len()
            ));
        }

        let delivery_ref = self.delivery.deliver(&output_dir).await?;

        request.mark_success(&delivery_ref);
        store::save_request(&paths.request_file(), &request).await?;

        logger.log_completion(&format!("delivered as {}", delivery_ref));
        Ok(delivery_ref)
    }
}
