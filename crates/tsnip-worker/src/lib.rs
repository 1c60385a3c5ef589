//! Clip request worker.
//!
//! This crate provides:
//! - The request orchestrator state machine (pending -> success)
//! - Collaborator traits for transcription, section generation and delivery
//! - Default adapters: subprocess transcriber, HTTP section generator,
//!   local delivery
//! - Request store, configuration and structured request logging

pub mod collab;
pub mod config;
pub mod error;
pub mod external;
pub mod logging;
pub mod orchestrator;
pub mod store;

pub use collab::{ArtifactDelivery, SectionGenerator, Transcriber};
pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use external::{CommandTranscriber, HttpSectionGenerator, LocalDelivery};
pub use logging::RequestLogger;
pub use orchestrator::RequestOrchestrator;
pub use store::RequestPaths;
