//! Word-level timestamped transcript model.
//!
//! Mirrors the transcript JSON produced by the transcription step:
//! `{text, segments: [{text, words: [{text, start, end}, ...]}, ...]}`,
//! with `start`/`end` in seconds.
//!
//! Matching downstream is purely token-equality based, so the tokenization
//! here (whitespace split of the trimmed segment text) must stay identical to
//! the wording the section-generation step quotes. Exact-token overlap is
//! cheap and works well when generated sections quote the transcript closely,
//! but it is brittle to paraphrase. That is a known limitation of this
//! tokenizer, not something handled elsewhere.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a transcript.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to read transcript: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse transcript JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("segment {segment} has {tokens} text tokens but {words} timed words")]
    WordCountMismatch {
        segment: usize,
        tokens: usize,
        words: usize,
    },

    #[error("segment {segment} word {word} starts at {start}s, after its end at {end}s")]
    InvertedWordTiming {
        segment: usize,
        word: usize,
        start: f64,
        end: f64,
    },

    #[error(
        "segment {segment} word {word} starts at {start}s, before the previous word ends at {previous_end}s"
    )]
    OverlappingWords {
        segment: usize,
        word: usize,
        start: f64,
        previous_end: f64,
    },
}

/// A single transcribed word with its timestamps.
///
/// Invariant: `start <= end`. Words within a segment are time-ordered and
/// non-overlapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    /// Transcribed word text
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl Word {
    /// Duration of the word in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A chronological chunk of transcript text with per-word timestamps.
///
/// Segment boundaries come from the transcription step and are opaque here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Joined segment text (denormalized from `words`)
    pub text: String,
    /// Timed words, one per whitespace token of `text`
    pub words: Vec<Word>,
}

impl Segment {
    /// Whitespace tokens of the trimmed segment text.
    pub fn tokens(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }
}

/// A full transcript: the joined text plus chronological segments.
///
/// Immutable once loaded; re-derived only by re-running transcription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Full transcript text
    pub text: String,
    /// Chronological segments partitioning the transcript
    pub segments: Vec<Segment>,
}

impl Transcript {
    /// Load and validate a transcript from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TranscriptError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse and validate a transcript from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, TranscriptError> {
        let transcript: Transcript = serde_json::from_reader(reader)?;
        transcript.validate()?;
        Ok(transcript)
    }

    /// Parse and validate a transcript from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, TranscriptError> {
        let transcript: Transcript = serde_json::from_str(json)?;
        transcript.validate()?;
        Ok(transcript)
    }

    /// Token sequences per segment, in chronological order.
    ///
    /// This is the candidate list the section matcher scans. Token index `i`
    /// of a segment corresponds to `words[i]` of the same segment, which
    /// `validate` guarantees.
    pub fn segment_tokens(&self) -> Vec<Vec<&str>> {
        self.segments.iter().map(Segment::tokens).collect()
    }

    /// Mean word duration in seconds across the whole transcript.
    ///
    /// Used only as a hint to the section-generation step, never for
    /// matching. Returns 0.0 for a transcript without words.
    pub fn avg_word_duration(&self) -> f64 {
        let mut total = 0.0;
        let mut count = 0usize;
        for segment in &self.segments {
            for word in &segment.words {
                total += word.duration();
                count += 1;
            }
        }
        if count == 0 {
            0.0
        } else {
            total / count as f64
        }
    }

    /// Check structural invariants.
    ///
    /// Token indices produced by matching are used to index `words` directly,
    /// so every segment must carry exactly one timed word per text token, and
    /// word timings must be ordered.
    fn validate(&self) -> Result<(), TranscriptError> {
        for (segment_index, segment) in self.segments.iter().enumerate() {
            let token_count = segment.text.split_whitespace().count();
            if token_count != segment.words.len() {
                return Err(TranscriptError::WordCountMismatch {
                    segment: segment_index,
                    tokens: token_count,
                    words: segment.words.len(),
                });
            }

            let mut previous_end: Option<f64> = None;
            for (word_index, word) in segment.words.iter().enumerate() {
                if word.start > word.end {
                    return Err(TranscriptError::InvertedWordTiming {
                        segment: segment_index,
                        word: word_index,
                        start: word.start,
                        end: word.end,
                    });
                }
                if let Some(previous_end) = previous_end {
                    if word.start < previous_end {
                        return Err(TranscriptError::OverlappingWords {
                            segment: segment_index,
                            word: word_index,
                            start: word.start,
                            previous_end,
                        });
                    }
                }
                previous_end = Some(word.end);
            }
        }
        Ok(())
    }
}
