//! Default configuration constants for libritts-db.
//!
//! Shared by the config layer, the CLI and the library so every entry point
//! agrees on the corpus layout and the output naming.

/// Maximum number of rows per transcription insert script.
///
/// Keeps each `INSERT` statement under the statement-size limits of
/// hosted SQLite consoles.
pub const CHUNK_SIZE: usize = 650;

/// Database name used in the header comment of every script.
pub const DATABASE_NAME: &str = "LibriTTS-R";

/// External transcoder program.
pub const TRANSCODER: &str = "ffmpeg";

/// Audio codec passed to the transcoder.
pub const CODEC: &str = "mp3";

/// File extension of transcoded audio.
pub const EXTENSION: &str = "mp3";

/// Transcoder VBR quality (`-q:a`), 0 = best, 9 = smallest.
pub const QUALITY: u8 = 4;

/// Number of transcoder workers. 1 runs the loop sequentially.
pub const JOBS: usize = 1;

/// Default corpus root when none is given on the command line.
pub const CORPUS_ROOT: &str = "tmp/LibriTTS_R";

/// Default output root when none is given on the command line.
pub const OUTPUT_ROOT: &str = "dist";

/// Separator used when a book title spans several physical lines.
pub const TITLE_LINE_SEPARATOR: &str = " / ";

// Corpus layout
pub const BOOKS_FILE: &str = "BOOKS.txt";
pub const CHAPTERS_FILE: &str = "CHAPTERS.txt";
pub const SPEAKERS_FILE: &str = "speakers.tsv";
pub const TRANSCRIPT_SUFFIX: &str = ".trans.tsv";
pub const AUDIO_EXTENSION: &str = "wav";

/// Depth of per-utterance files below the corpus root (subset/speaker/chapter/file).
pub const UTTERANCE_DEPTH: usize = 4;

// Output layout
pub const SCHEMA_SCRIPT: &str = "01_schema.sql";
pub const TRANSCRIPTION_SCRIPT_PREFIX: &str = "02_transcriptions_";
pub const INDEX_SCRIPT: &str = "03_indexes.sql";

/// Name of a transcription chunk script for a 1-based chunk index.
pub fn transcription_script_name(index: usize) -> String {
    format!("{TRANSCRIPTION_SCRIPT_PREFIX}{index:02}.sql")
}
