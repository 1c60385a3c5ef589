//! Section-to-transcript alignment.
//!
//! This crate locates approximate, possibly reworded phrases inside an exact
//! word-level transcript and turns the located window into a cuttable time
//! range:
//! - [`SectionMatcher`] scans segment token sequences for the best-overlapping
//!   contiguous window of a target phrase.
//! - [`plan_clip`] maps a match back to absolute timestamps with a symmetric
//!   buffer.
//!
//! Matching is deliberately brute-force token overlap (no fuzzy or semantic
//! matching); segment and phrase lengths are sentence-scale, so the window
//! scan is not a hot path.

pub mod matcher;
pub mod planner;

pub use matcher::{EligibilityGate, SectionMatch, SectionMatcher};
pub use planner::{plan_clip, ClipPlan};
