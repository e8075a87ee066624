//! Audio inventory: which files to transcode and where they go.

use crate::corpus::utterance_files;
use crate::defaults::AUDIO_EXTENSION;
use crate::error::Result;
use crate::model::IdSet;
use std::path::{Path, PathBuf};

/// One file to transcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioJob {
    pub source: PathBuf,
    pub target: PathBuf,
}

/// Chapter id of an utterance file: the name of its parent directory.
pub fn chapter_of(path: &Path) -> Option<&str> {
    path.parent()?.file_name()?.to_str()
}

/// Mirror `source` from `corpus_root` into `output_root` with a new extension.
pub fn mirrored_path(
    corpus_root: &Path,
    output_root: &Path,
    source: &Path,
    extension: &str,
) -> PathBuf {
    let relative = source.strip_prefix(corpus_root).unwrap_or(source);
    output_root.join(relative).with_extension(extension)
}

/// Every `*/*/*/*.wav` under `corpus_root` belonging to one of `chapter_ids`,
/// sorted by source path.
pub fn plan_jobs(
    corpus_root: &Path,
    output_root: &Path,
    chapter_ids: &IdSet,
    extension: &str,
) -> Result<Vec<AudioJob>> {
    let suffix = format!(".{AUDIO_EXTENSION}");
    let sources = utterance_files(corpus_root, |name| name.ends_with(&suffix))?;
    let total = sources.len();

    let jobs: Vec<AudioJob> = sources
        .into_iter()
        .filter(|source| chapter_of(source).is_some_and(|chapter| chapter_ids.contains(chapter)))
        .map(|source| AudioJob {
            target: mirrored_path(corpus_root, output_root, &source, extension),
            source,
        })
        .collect();

    tracing::info!(
        found = total,
        selected = jobs.len(),
        "Planned audio transcoding"
    );
    Ok(jobs)
}
