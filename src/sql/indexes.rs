//! `03_indexes.sql`: secondary indexes, created after the data load.

use crate::sql::{RenderOptions, ScriptBuilder};

const INDEX_GROUPS: &[(&str, &[&str])] = &[
    (
        "Book search optimization",
        &[
            "CREATE INDEX idx_books_title_nocase ON books(title COLLATE NOCASE);",
            "CREATE INDEX idx_books_author_nocase ON books(author COLLATE NOCASE);",
        ],
    ),
    (
        "Chapter and speaker search optimization",
        &[
            "CREATE INDEX idx_chapters_book_id ON chapters(book_id);",
            "CREATE INDEX idx_chapters_speaker_id ON chapters(speaker_id);",
            "CREATE INDEX idx_chapters_book_speaker ON chapters(book_id, speaker_id);",
        ],
    ),
    (
        "Transcript search optimization",
        &[
            "CREATE INDEX idx_transcriptions_chapter_id ON transcriptions(chapter_id);",
            "CREATE INDEX idx_transcriptions_transcript_nocase ON transcriptions(transcript COLLATE NOCASE);",
            "CREATE INDEX idx_transcriptions_segment_order ON transcriptions(chapter_id, segment, subsegment);",
        ],
    ),
];

pub fn render_indexes(options: &RenderOptions) -> String {
    let mut script = ScriptBuilder::with_header(
        &format!("Indexes for {} Database", options.database_name),
        options.generated_on,
    );
    for (comment, statements) in INDEX_GROUPS {
        script.line(format!("-- {comment}"));
        for statement in *statements {
            script.line(*statement);
        }
        script.blank();
    }
    script.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn render() -> String {
        render_indexes(&RenderOptions {
            database_name: "LibriTTS-R".to_string(),
            chunk_size: 650,
            generated_on: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        })
    }

    #[test]
    fn test_header() {
        assert!(render().starts_with(
            "-- -- Indexes for LibriTTS-R Database\n-- Generated on: 2024-01-02\n\n"
        ));
    }

    #[test]
    fn test_all_indexes_are_non_unique() {
        let sql = render();
        assert_eq!(sql.matches("CREATE INDEX ").count(), 8);
        assert!(!sql.contains("UNIQUE"));
    }

    #[test]
    fn test_text_indexes_are_case_insensitive() {
        let sql = render();
        assert!(sql.contains("ON books(title COLLATE NOCASE);"));
        assert!(sql.contains("ON books(author COLLATE NOCASE);"));
        assert!(sql.contains("ON transcriptions(transcript COLLATE NOCASE);"));
    }

    #[test]
    fn test_segment_order_index_is_composite() {
        assert!(render().contains(
            "CREATE INDEX idx_transcriptions_segment_order ON transcriptions(chapter_id, segment, subsegment);\n"
        ));
    }
}
