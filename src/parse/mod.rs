//! Parsers for the four metadata formats of the corpus.
//!
//! Every parser is a pure function over file contents. Filter sets produced
//! by one stage are passed explicitly into the next.

pub mod books;
pub mod chapters;
pub mod speakers;
pub mod transcripts;

pub use books::{BookField, BookScanner, parse_books};
pub use chapters::{ChapterCatalog, parse_chapters};
pub use speakers::parse_speakers;
pub use transcripts::{TranscriptIndex, parse_transcript_file, parse_transcripts};
