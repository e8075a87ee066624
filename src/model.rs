//! Corpus entities as parsed from the raw distribution.
//!
//! Identifiers stay opaque strings until SQL emission; numeric conversion
//! happens in [`crate::sql`].

use serde::Serialize;
use std::collections::HashSet;

/// A book from `BOOKS.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
}

/// A reader from `speakers.tsv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Speaker {
    pub id: String,
    pub name: String,
    pub gender: String,
}

/// A recorded chapter from `CHAPTERS.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub id: String,
    pub book_id: String,
    pub speaker_id: String,
    pub title: String,
    /// Duration in minutes, kept as source text.
    pub minutes: String,
    pub subset: String,
}

/// One utterance line from a `*.trans.tsv` index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcription {
    pub chapter_id: String,
    pub segment: String,
    pub subsegment: String,
    pub transcript: String,
}

impl Transcription {
    /// Composite primary key.
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.chapter_id, &self.segment, &self.subsegment)
    }
}

/// Set of opaque identifiers used as a filter between stages.
pub type IdSet = HashSet<String>;

/// The reconciled, mutually consistent entity set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Corpus {
    pub books: Vec<Book>,
    pub speakers: Vec<Speaker>,
    pub chapters: Vec<Chapter>,
    pub transcriptions: Vec<Transcription>,
}

impl Corpus {
    /// Ids of all chapters in the corpus.
    pub fn chapter_ids(&self) -> IdSet {
        self.chapters.iter().map(|c| c.id.clone()).collect()
    }

    /// Row counts per table, in schema order.
    pub fn counts(&self) -> EntityCounts {
        EntityCounts {
            books: self.books.len(),
            speakers: self.speakers.len(),
            chapters: self.chapters.len(),
            transcriptions: self.transcriptions.len(),
        }
    }
}

/// Row counts of a reconciled corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntityCounts {
    pub books: usize,
    pub speakers: usize,
    pub chapters: usize,
    pub transcriptions: usize,
}
