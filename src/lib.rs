//! Small AI-service task drivers: audio transcription, map reading, image
//! generation and file categorization, plus the helpers they share.

/// Task-data download and answer submission.
pub mod centrala;
/// CLI subcommands, one per task.
pub mod commands;
/// Environment and config-file settings.
pub mod config;
pub mod error;
/// Directory scans.
pub mod files;
/// Reply parsing: tag extraction and categorization.
pub mod interpret;
pub mod logging;
/// Local model access.
pub mod ollama;
/// OpenAI-compatible client.
pub mod openai;

pub use error::{Error, Result};

/// Version string shown by every binary.
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TP_GIT_SHA"),
    ", built ",
    env!("TP_BUILD_TS"),
    ")"
);
