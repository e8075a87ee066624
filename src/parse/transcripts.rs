//! Parser for per-chapter `*.trans.tsv` transcription indexes.
//!
//! Each line is `<compound-id>\t<text>[\t<normalized text>]`, where the
//! compound id is `<speaker>_<chapter>_<segment>_<subsegment>`.

use crate::error::{LibrittsError, Result};
use crate::model::{IdSet, Transcription};

/// All transcriptions of a corpus plus the chapter ids they mention.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptIndex {
    pub transcriptions: Vec<Transcription>,
    pub chapter_ids: IdSet,
}

/// Parse a single transcription line.
///
/// `source_name` and `line` only feed the error message.
pub fn parse_transcript_line(source_name: &str, line: usize, text: &str) -> Result<Transcription> {
    let mut columns = text.split('\t');
    let compound_id = columns.next().unwrap_or_default().trim();
    let transcript = columns.next().ok_or_else(|| {
        LibrittsError::malformed(source_name, line, "missing transcript column")
    })?;

    let ids: Vec<&str> = compound_id.split('_').collect();
    if ids.len() < 4 {
        return Err(LibrittsError::malformed(
            source_name,
            line,
            format!("compound id {compound_id:?} has fewer than 4 parts"),
        ));
    }

    Ok(Transcription {
        chapter_id: ids[1].trim().to_string(),
        segment: ids[2].trim().to_string(),
        subsegment: ids[3].trim().to_string(),
        transcript: transcript.trim().to_string(),
    })
}

/// Parse one index file. Blank lines are skipped.
pub fn parse_transcript_file(source_name: &str, content: &str) -> Result<Vec<Transcription>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(idx, text)| parse_transcript_line(source_name, idx + 1, text))
        .collect()
}

/// Parse every index file in the given order.
///
/// Files are `(source_name, content)` pairs; the caller decides the order.
pub fn parse_transcripts<'a, I>(files: I) -> Result<TranscriptIndex>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut index = TranscriptIndex::default();
    for (source_name, content) in files {
        for transcription in parse_transcript_file(source_name, content)? {
            index.chapter_ids.insert(transcription.chapter_id.clone());
            index.transcriptions.push(transcription);
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_compound_id_positions() {
        let t = parse_transcript_line("a.trans.tsv", 1, "1234_5678_000001_000000\tHello there")
            .unwrap();
        assert_eq!(
            t,
            Transcription {
                chapter_id: "5678".to_string(),
                segment: "000001".to_string(),
                subsegment: "000000".to_string(),
                transcript: "Hello there".to_string(),
            }
        );
    }

    #[test]
    fn test_uses_first_text_column_and_trims() {
        let t = parse_transcript_line(
            "a.trans.tsv",
            1,
            " 19_198_000000_000003 \t  Original, text.  \toriginal text\r",
        )
        .unwrap();
        assert_eq!(t.chapter_id, "198");
        assert_eq!(t.subsegment, "000003");
        assert_eq!(t.transcript, "Original, text.");
    }

    #[test]
    fn test_short_compound_id_is_fatal() {
        let err = parse_transcript_line("84_121123.trans.tsv", 7, "84_121123_000001\tHi")
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("84_121123.trans.tsv line 7"), "{message}");
        assert!(message.contains("fewer than 4 parts"), "{message}");
    }

    #[test]
    fn test_missing_text_column_is_fatal() {
        let err = parse_transcript_line("x", 1, "1_2_3_4").unwrap_err();
        assert!(err.to_string().contains("missing transcript column"));
    }

    #[test]
    fn test_file_skips_blank_lines_and_reports_real_line_numbers() {
        let content = "1_2_000001_000000\tOne\n\n1_2_000002\tbroken\n";
        let err = parse_transcript_file("f", content).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err}");

        let ok = parse_transcript_file("f", "1_2_000001_000000\tOne\n   \n").unwrap();
        assert_eq!(ok.len(), 1);
    }

    #[test]
    fn test_collects_chapter_ids_across_files_in_order() {
        let files = [
            ("b", "7_20_000001_000000\tB1\n7_20_000002_000000\tB2\n"),
            ("a", "7_10_000001_000000\tA1\n"),
        ];
        let index = parse_transcripts(files).unwrap();

        let transcripts: Vec<&str> = index
            .transcriptions
            .iter()
            .map(|t| t.transcript.as_str())
            .collect();
        assert_eq!(transcripts, vec!["B1", "B2", "A1"]);
        assert_eq!(index.chapter_ids.len(), 2);
        assert!(index.chapter_ids.contains("10"));
        assert!(index.chapter_ids.contains("20"));
    }
}
