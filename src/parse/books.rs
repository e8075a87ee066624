//! Parser for the `BOOKS.txt` catalog.
//!
//! Records are `id|title|author\n`, but titles may contain raw newlines, so
//! the catalog cannot be split on lines. The scanner walks the text one
//! character at a time and tracks which field it is accumulating.

use crate::defaults::TITLE_LINE_SEPARATOR;
use crate::model::Book;
use std::mem;

/// Field currently being accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Id,
    Title,
    Author,
}

/// Character-level state machine over the book catalog.
#[derive(Debug)]
pub struct BookScanner {
    field: BookField,
    buffer: String,
    id: String,
    title: String,
    books: Vec<Book>,
}

impl Default for BookScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl BookScanner {
    pub fn new() -> Self {
        Self {
            field: BookField::Id,
            buffer: String::new(),
            id: String::new(),
            title: String::new(),
            books: Vec::new(),
        }
    }

    /// Field the next character belongs to.
    pub fn field(&self) -> BookField {
        self.field
    }

    /// Advance the machine by one character.
    pub fn feed(&mut self, ch: char) {
        match (self.field, ch) {
            (BookField::Id, '|') => {
                self.id = mem::take(&mut self.buffer).trim().to_string();
                self.field = BookField::Title;
            }
            // Ids never span lines: whatever precedes a newline here is a
            // stray comment or blank line.
            (BookField::Id, '\n') => self.buffer.clear(),
            (BookField::Title, '|') => {
                self.title = join_title_lines(&mem::take(&mut self.buffer));
                self.field = BookField::Author;
            }
            (BookField::Author, '\n') => self.emit(),
            (_, ch) => self.buffer.push(ch),
        }
    }

    /// Flush a final record that lacks a trailing newline and return all books.
    pub fn finish(mut self) -> Vec<Book> {
        match self.field {
            BookField::Author => self.emit(),
            BookField::Title => {
                tracing::warn!(id = %self.id, "Book catalog ends inside a title, record dropped");
            }
            BookField::Id => {}
        }
        self.books
    }

    fn emit(&mut self) {
        let author = mem::take(&mut self.buffer).trim().to_string();
        self.books.push(Book {
            id: mem::take(&mut self.id),
            title: mem::take(&mut self.title),
            author: (!author.is_empty()).then_some(author),
        });
        self.field = BookField::Id;
    }
}

/// Trim every physical line of a title and join them, blank lines included.
fn join_title_lines(raw: &str) -> String {
    raw.split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(TITLE_LINE_SEPARATOR)
}

/// Parse the whole catalog into books, in file order, unfiltered.
pub fn parse_books(content: &str) -> Vec<Book> {
    let mut scanner = BookScanner::new();
    for ch in content.chars() {
        scanner.feed(ch);
    }
    scanner.finish()
}
