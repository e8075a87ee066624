//! Parser for the `CHAPTERS.txt` catalog.
//!
//! One `|`-delimited record per line:
//! `id|speaker|minutes|subset|project|book|title|project title`.
//! Lines starting with `;` are comments.

use crate::defaults::CHAPTERS_FILE;
use crate::error::{LibrittsError, Result};
use crate::model::{Chapter, IdSet};

const ID: usize = 0;
const SPEAKER_ID: usize = 1;
const MINUTES: usize = 2;
const SUBSET: usize = 3;
const BOOK_ID: usize = 5;
const TITLE: usize = 6;

/// Chapters accepted by the filters plus the parents they reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChapterCatalog {
    pub chapters: Vec<Chapter>,
    pub book_ids: IdSet,
    pub speaker_ids: IdSet,
}

fn field<'a>(parts: &[&'a str], index: usize, name: &str, line: usize) -> Result<&'a str> {
    parts
        .get(index)
        .map(|value| value.trim())
        .ok_or_else(|| {
            LibrittsError::malformed(CHAPTERS_FILE, line, format!("missing field {index} ({name})"))
        })
}

/// Parse the chapter catalog, keeping chapters that have transcriptions
/// (`valid_chapter_ids`) and whose book exists (`existing_book_ids`).
///
/// Missing fields are only an error on lines that pass the id filter.
pub fn parse_chapters(
    content: &str,
    valid_chapter_ids: &IdSet,
    existing_book_ids: &IdSet,
) -> Result<ChapterCatalog> {
    let mut catalog = ChapterCatalog::default();

    for (idx, text) in content.lines().enumerate() {
        let line = idx + 1;
        if text.trim().is_empty() || text.trim_start().starts_with(';') {
            continue;
        }

        let parts: Vec<&str> = text.split('|').collect();
        let id = field(&parts, ID, "chapter id", line)?;
        if !valid_chapter_ids.contains(id) {
            continue;
        }

        let book_id = field(&parts, BOOK_ID, "book id", line)?;
        if !existing_book_ids.contains(book_id) {
            continue;
        }

        let chapter = Chapter {
            id: id.to_string(),
            book_id: book_id.to_string(),
            speaker_id: field(&parts, SPEAKER_ID, "speaker id", line)?.to_string(),
            title: field(&parts, TITLE, "title", line)?.to_string(),
            minutes: field(&parts, MINUTES, "minutes", line)?.to_string(),
            subset: field(&parts, SUBSET, "subset", line)?.to_string(),
        };
        catalog.book_ids.insert(chapter.book_id.clone());
        catalog.speaker_ids.insert(chapter.speaker_id.clone());
        catalog.chapters.push(chapter);
    }

    Ok(catalog)
}
