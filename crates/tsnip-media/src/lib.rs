//! FFmpeg CLI wrapper for lossless clip extraction.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - A runner with stderr capture and optional timeout
//! - Stream-copy clip extraction over a time range
//! - The [`Cutter`] trait so callers can substitute a deterministic stand-in

pub mod command;
pub mod error;
pub mod trim;

pub use command::{check_ffmpeg, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use trim::{extract_clip, Cutter, StreamCopyCutter};
