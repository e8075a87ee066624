//! `01_schema.sql`: tables plus the book, speaker and chapter rows.

use crate::error::Result;
use crate::model::{Book, Chapter, Corpus, Speaker};
use crate::sql::literal::{integer, nullable_text, real, text};
use crate::sql::{RenderOptions, ScriptBuilder};

const BOOKS_TABLE: &str = "\
CREATE TABLE books (
  id INTEGER PRIMARY KEY,
  title TEXT NOT NULL,
  author TEXT
);";

const SPEAKERS_TABLE: &str = "\
CREATE TABLE speakers (
  id INTEGER PRIMARY KEY,
  name TEXT NOT NULL,
  gender TEXT NOT NULL
);";

const CHAPTERS_TABLE: &str = "\
CREATE TABLE chapters (
  id INTEGER PRIMARY KEY,
  book_id INTEGER NOT NULL,
  speaker_id INTEGER NOT NULL,
  title TEXT NOT NULL,
  minutes REAL NOT NULL,
  subset TEXT NOT NULL,
  FOREIGN KEY (book_id) REFERENCES books(id),
  FOREIGN KEY (speaker_id) REFERENCES speakers(id)
);";

const TRANSCRIPTIONS_TABLE: &str = "\
CREATE TABLE transcriptions (
  chapter_id INTEGER NOT NULL,
  segment TEXT NOT NULL,
  subsegment TEXT NOT NULL,
  transcript TEXT NOT NULL,
  PRIMARY KEY (chapter_id, segment, subsegment),
  FOREIGN KEY (chapter_id) REFERENCES chapters(id)
);";

fn book_row(book: &Book) -> Result<String> {
    Ok(format!(
        "({}, {}, {})",
        integer(&book.id, "books", "id")?,
        text(&book.title),
        nullable_text(book.author.as_deref()),
    ))
}

fn speaker_row(speaker: &Speaker) -> Result<String> {
    Ok(format!(
        "({}, {}, {})",
        integer(&speaker.id, "speakers", "id")?,
        text(&speaker.name),
        text(&speaker.gender),
    ))
}

fn chapter_row(chapter: &Chapter) -> Result<String> {
    Ok(format!(
        "({}, {}, {}, {}, {}, {})",
        integer(&chapter.id, "chapters", "id")?,
        integer(&chapter.book_id, "chapters", "book_id")?,
        integer(&chapter.speaker_id, "chapters", "speaker_id")?,
        text(&chapter.title),
        real(&chapter.minutes, "chapters", "minutes")?,
        text(&chapter.subset),
    ))
}

/// Render the schema script: pragma, tables, then parent rows in corpus order.
pub fn render_schema(corpus: &Corpus, options: &RenderOptions) -> Result<String> {
    let books = corpus.books.iter().map(book_row).collect::<Result<Vec<_>>>()?;
    let speakers = corpus
        .speakers
        .iter()
        .map(speaker_row)
        .collect::<Result<Vec<_>>>()?;
    let chapters = corpus
        .chapters
        .iter()
        .map(chapter_row)
        .collect::<Result<Vec<_>>>()?;

    let mut script = ScriptBuilder::with_header(
        &format!("{} Database Schema", options.database_name),
        options.generated_on,
    );
    script.line("PRAGMA foreign_keys = ON;");
    script.blank();

    for (comment, ddl) in [
        ("Create books table", BOOKS_TABLE),
        ("Create speakers table", SPEAKERS_TABLE),
        ("Create chapters table", CHAPTERS_TABLE),
        ("Create transcriptions table", TRANSCRIPTIONS_TABLE),
    ] {
        script.line(format!("-- {comment}"));
        script.line(ddl);
        script.blank();
    }

    script.insert("Insert books data", "books", &["id", "title", "author"], &books);
    script.insert(
        "Insert speakers data",
        "speakers",
        &["id", "name", "gender"],
        &speakers,
    );
    script.insert(
        "Insert chapters data",
        "chapters",
        &["id", "book_id", "speaker_id", "title", "minutes", "subset"],
        &chapters,
    );

    Ok(script.finish())
}
