//! Error types for libritts-db.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibrittsError {
    // Configuration errors
    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    // Corpus layout and parsing errors
    #[error("Corpus file not found at {path}")]
    MissingCorpusFile { path: String },

    #[error("Malformed record in {source_name} line {line}: {message}")]
    MalformedRecord {
        source_name: String,
        line: usize,
        message: String,
    },

    // SQL emission errors
    #[error("Invalid number for {table}.{field}: {value:?}")]
    InvalidNumber {
        table: &'static str,
        field: &'static str,
        value: String,
    },

    // Transcoding errors
    #[error("Transcoder not found: {tool}")]
    TranscoderNotFound { tool: String },

    #[error("Transcode failed: {message}")]
    TranscodeFailed { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LibrittsError>;

impl LibrittsError {
    /// Build a `MalformedRecord` error for a 1-based line of a named source.
    pub fn malformed(source_name: &str, line: usize, message: impl Into<String>) -> Self {
        LibrittsError::MalformedRecord {
            source_name: source_name.to_string(),
            line,
            message: message.into(),
        }
    }
}
