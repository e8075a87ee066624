//! `02_transcriptions_NN.sql`: transcription rows split into bounded chunks.

use crate::defaults::transcription_script_name;
use crate::error::{LibrittsError, Result};
use crate::model::Transcription;
use crate::sql::literal::{integer, text};
use crate::sql::{RenderOptions, ScriptBuilder, SqlScript};

const COLUMNS: &[&str] = &["chapter_id", "segment", "subsegment", "transcript"];

fn transcription_row(t: &Transcription) -> Result<String> {
    Ok(format!(
        "({}, {}, {}, {})",
        integer(&t.chapter_id, "transcriptions", "chapter_id")?,
        text(&t.segment),
        text(&t.subsegment),
        text(&t.transcript),
    ))
}

/// Render one self-contained script per chunk of at most
/// `options.chunk_size` rows, numbered from 1, in input order.
pub fn render_transcription_chunks(
    transcriptions: &[Transcription],
    options: &RenderOptions,
) -> Result<Vec<SqlScript>> {
    if options.chunk_size == 0 {
        return Err(LibrittsError::ConfigInvalidValue {
            key: "sql.chunk_size".to_string(),
            message: "must be at least 1".to_string(),
        });
    }

    let total = transcriptions.len().div_ceil(options.chunk_size);
    transcriptions
        .chunks(options.chunk_size)
        .enumerate()
        .map(|(idx, chunk)| {
            let index = idx + 1;
            let rows = chunk
                .iter()
                .map(transcription_row)
                .collect::<Result<Vec<_>>>()?;

            let mut script = ScriptBuilder::with_header(
                &format!("Transcription chunk {index} of {total}"),
                options.generated_on,
            );
            script.insert("Insert transcriptions data", "transcriptions", COLUMNS, &rows);

            Ok(SqlScript {
                file_name: transcription_script_name(index),
                contents: script.finish(),
            })
        })
        .collect()
}
