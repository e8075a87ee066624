//! libritts-db - LibriTTS corpus to SQL converter
//!
//! Parses the corpus metadata, reconciles it into a referentially closed set
//! and emits SQLite scripts plus a transcoded copy of the audio.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

pub mod app;
pub mod audio;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod corpus;
pub mod defaults;
#[cfg(feature = "cli")]
pub mod diagnostics;
pub mod error;
pub mod model;
#[cfg(feature = "cli")]
pub mod output;
pub mod parse;
pub mod reconcile;
pub mod sql;

// Stages
pub use corpus::RawCorpus;
pub use reconcile::reconcile;
pub use sql::{RenderOptions, SqlScript, render_all, write_scripts};

// Transcoding seams
pub use audio::transcoder::{CommandExecutor, FfmpegTranscoder, SystemCommandExecutor, Transcoder};

// Data model
pub use model::{Book, Chapter, Corpus, EntityCounts, Speaker, Transcription};

// Error handling
pub use error::{LibrittsError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
