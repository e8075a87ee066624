//! SQL script emission.
//!
//! Rendering is a pure function of the reconciled corpus and
//! [`RenderOptions`]; the generation date is an input so two renders of the
//! same corpus on the same day are byte-identical.

pub mod indexes;
pub mod literal;
pub mod schema;
pub mod transcriptions;
pub mod writer;

use crate::defaults::{self, INDEX_SCRIPT, SCHEMA_SCRIPT};
use crate::error::Result;
use crate::model::Corpus;
use chrono::NaiveDate;

pub use indexes::render_indexes;
pub use schema::render_schema;
pub use transcriptions::render_transcription_chunks;
pub use writer::write_scripts;

/// Options shared by every script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Name shown in script headers.
    pub database_name: String,
    /// Maximum transcription rows per chunk script.
    pub chunk_size: usize,
    /// Date written into every header.
    pub generated_on: NaiveDate,
}

impl RenderOptions {
    /// Options with default name and chunk size, dated today.
    pub fn today() -> Self {
        Self {
            database_name: defaults::DATABASE_NAME.to_string(),
            chunk_size: defaults::CHUNK_SIZE,
            generated_on: chrono::Local::now().date_naive(),
        }
    }
}

/// A rendered script and the file name it is written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlScript {
    pub file_name: String,
    pub contents: String,
}

/// Render schema, transcription chunks and indexes, in execution order.
pub fn render_all(corpus: &Corpus, options: &RenderOptions) -> Result<Vec<SqlScript>> {
    let mut scripts = vec![SqlScript {
        file_name: SCHEMA_SCRIPT.to_string(),
        contents: render_schema(corpus, options)?,
    }];
    scripts.extend(render_transcription_chunks(&corpus.transcriptions, options)?);
    scripts.push(SqlScript {
        file_name: INDEX_SCRIPT.to_string(),
        contents: render_indexes(options),
    });
    Ok(scripts)
}

/// Accumulates script lines; joined with `\n` and ending in a newline.
#[derive(Debug, Default)]
pub(crate) struct ScriptBuilder {
    lines: Vec<String>,
}

impl ScriptBuilder {
    /// Start a script with the `-- -- title` / generation date header.
    pub(crate) fn with_header(title: &str, generated_on: NaiveDate) -> Self {
        let mut builder = Self::default();
        builder.line(format!("-- -- {title}"));
        builder.line(format!("-- Generated on: {}", generated_on.format("%Y-%m-%d")));
        builder.blank();
        builder
    }

    pub(crate) fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub(crate) fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Multi-row `INSERT ... VALUES` preceded by a comment.
    ///
    /// Nothing is written for an empty row set: `VALUES` with no rows is not
    /// valid SQL.
    pub(crate) fn insert(&mut self, comment: &str, table: &str, columns: &[&str], rows: &[String]) {
        if rows.is_empty() {
            return;
        }
        self.line(format!("-- {comment}"));
        self.line(format!("INSERT INTO {table} ({})", columns.join(", ")));
        self.line("VALUES");
        self.line(format!("  {};", rows.join(",\n  ")));
        self.blank();
    }

    pub(crate) fn finish(self) -> String {
        self.lines.join("\n")
    }
}
