//! Shared data models for tsnip.
//!
//! This crate provides Serde-serializable types for:
//! - Word-level timestamped transcripts (with load-time validation)
//! - Section descriptions parsed from generated text
//! - The durable clip request record

pub mod request;
pub mod section;
pub mod transcript;

// Re-export common types
pub use request::{derive_request_id, ClipRequest, RequestStatus};
pub use section::{parse_sections, Section};
pub use transcript::{Segment, Transcript, TranscriptError, Word};
