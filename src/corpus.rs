//! Corpus root discovery and loading.
//!
//! Reads the fixed LibriTTS layout into memory so the parsers and the
//! reconciler never touch the filesystem:
//!
//! ```text
//! <root>/BOOKS.txt
//! <root>/CHAPTERS.txt
//! <root>/speakers.tsv
//! <root>/<subset>/<speaker>/<chapter>/<speaker>_<chapter>.trans.tsv
//! <root>/<subset>/<speaker>/<chapter>/<utterance>.wav
//! ```

use crate::defaults::{
    BOOKS_FILE, CHAPTERS_FILE, SPEAKERS_FILE, TRANSCRIPT_SUFFIX, UTTERANCE_DEPTH,
};
use crate::error::{LibrittsError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// One transcription index file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptSource {
    /// Path relative to the corpus root, used in error messages.
    pub name: String,
    pub content: String,
}

/// Raw text of every metadata file in the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCorpus {
    pub transcripts: Vec<TranscriptSource>,
    pub books: String,
    pub chapters: String,
    pub speakers: String,
}

impl RawCorpus {
    /// Read all metadata files under `root`.
    ///
    /// Transcription indexes are read in sorted path order.
    pub fn load(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(LibrittsError::MissingCorpusFile {
                path: root.display().to_string(),
            });
        }

        let transcript_paths =
            utterance_files(root, |name| name.ends_with(TRANSCRIPT_SUFFIX))?;
        tracing::debug!(files = transcript_paths.len(), "Found transcription indexes");

        let transcripts = transcript_paths
            .iter()
            .map(|path| {
                Ok(TranscriptSource {
                    name: relative_name(root, path),
                    content: fs::read_to_string(path)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            transcripts,
            books: read_required(&root.join(BOOKS_FILE))?,
            chapters: read_required(&root.join(CHAPTERS_FILE))?,
            speakers: read_required(&root.join(SPEAKERS_FILE))?,
        })
    }

    /// `(name, content)` pairs of the transcription indexes, in load order.
    pub fn transcript_sources(&self) -> impl Iterator<Item = (&str, &str)> {
        self.transcripts
            .iter()
            .map(|source| (source.name.as_str(), source.content.as_str()))
    }
}

fn read_required(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LibrittsError::MissingCorpusFile {
                path: path.display().to_string(),
            }
        } else {
            LibrittsError::Io(e)
        }
    })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Files exactly at utterance depth (`*/*/*/<file>`) whose name matches
/// `matches`, sorted by path. Hidden entries are skipped.
pub fn utterance_files<F>(root: &Path, matches: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&str) -> bool,
{
    let walker = WalkDir::new(root)
        .min_depth(UTTERANCE_DEPTH)
        .max_depth(UTTERANCE_DEPTH)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && entry.file_name().to_str().is_some_and(&matches) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Path of `path` relative to `root`, for messages.
pub fn relative_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
