//! Referential reconciliation of the four entity sets.
//!
//! The parse order is the algorithm: each stage's filter set comes from the
//! previous stage. Dropping an entity whose keys do not line up is a filter,
//! never an error.

use crate::corpus::RawCorpus;
use crate::error::Result;
use crate::model::{Chapter, Corpus, IdSet, Transcription};
use crate::parse::{parse_books, parse_chapters, parse_speakers, parse_transcripts};
use std::collections::HashSet;
use std::hash::Hash;

/// Parse and reconcile a loaded corpus into its maximal consistent subset.
pub fn reconcile(raw: &RawCorpus) -> Result<Corpus> {
    // 1. Every chapter must have at least one transcription.
    let index = parse_transcripts(raw.transcript_sources())?;
    tracing::debug!(
        transcriptions = index.transcriptions.len(),
        chapters = index.chapter_ids.len(),
        "Parsed transcription indexes"
    );

    // 2. Candidate books, unfiltered.
    let books = dedup_by_key(parse_books(&raw.books), |b| b.id.clone(), "book");
    let candidate_book_ids = ids(&books, |b| &b.id);

    // 3. Chapters with transcriptions and an existing book.
    let catalog = parse_chapters(&raw.chapters, &index.chapter_ids, &candidate_book_ids)?;
    let chapters = dedup_by_key(catalog.chapters, |c| c.id.clone(), "chapter");

    // 4. Books referenced by an accepted chapter.
    let books = retain_referenced(books, &catalog.book_ids, |b| &b.id);

    // 5. Speakers referenced by an accepted chapter.
    let speakers = dedup_by_key(
        parse_speakers(&raw.speakers, &catalog.speaker_ids)?,
        |s| s.id.clone(),
        "speaker",
    );

    // 6. Close over speakers missing from the table, then keep the
    //    transcriptions of surviving chapters.
    let corpus = close(Corpus {
        books,
        speakers,
        chapters,
        transcriptions: index.transcriptions,
    });

    tracing::info!(
        books = corpus.books.len(),
        speakers = corpus.speakers.len(),
        chapters = corpus.chapters.len(),
        transcriptions = corpus.transcriptions.len(),
        "Reconciled corpus"
    );
    Ok(corpus)
}

/// Restrict a corpus to its referentially closed subset.
///
/// Chapters need both parents; books and speakers need a chapter;
/// transcriptions need a chapter. A single pass reaches the fixed point:
/// dropping an unreferenced parent can never orphan a chapter.
pub fn close(corpus: Corpus) -> Corpus {
    let book_ids = ids(&corpus.books, |b| &b.id);
    let speaker_ids = ids(&corpus.speakers, |s| &s.id);

    let chapters: Vec<Chapter> = corpus
        .chapters
        .into_iter()
        .filter(|c| book_ids.contains(&c.book_id) && speaker_ids.contains(&c.speaker_id))
        .collect();

    let referenced_books = ids(&chapters, |c| &c.book_id);
    let referenced_speakers = ids(&chapters, |c| &c.speaker_id);
    let chapter_ids = ids(&chapters, |c| &c.id);

    let transcriptions = dedup_by_key(
        retain_referenced(corpus.transcriptions, &chapter_ids, |t| &t.chapter_id),
        |t: &Transcription| {
            let (chapter, segment, subsegment) = t.key();
            (chapter.to_string(), segment.to_string(), subsegment.to_string())
        },
        "transcription",
    );

    Corpus {
        books: retain_referenced(corpus.books, &referenced_books, |b| &b.id),
        speakers: retain_referenced(corpus.speakers, &referenced_speakers, |s| &s.id),
        chapters,
        transcriptions,
    }
}

/// Keep the items whose key is in `ids`, preserving order.
pub fn retain_referenced<T, F>(items: Vec<T>, ids: &IdSet, key: F) -> Vec<T>
where
    F: Fn(&T) -> &String,
{
    items.into_iter().filter(|item| ids.contains(key(item))).collect()
}

/// Collect the keys of `items` into a set.
pub fn ids<T, F>(items: &[T], key: F) -> IdSet
where
    F: Fn(&T) -> &String,
{
    items.iter().map(|item| key(item).clone()).collect()
}

/// Keep the first item for every key, warning about later duplicates.
fn dedup_by_key<T, K, F>(items: Vec<T>, key: F, what: &str) -> Vec<T>
where
    K: Hash + Eq + std::fmt::Debug,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| {
            let k = key(item);
            if seen.contains(&k) {
                tracing::warn!(key = ?k, "Duplicate {what} dropped");
                false
            } else {
                seen.insert(k);
                true
            }
        })
        .collect()
}
