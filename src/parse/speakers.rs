//! Parser for `speakers.tsv` (`READER\tGENDER\tSUBSET\tNAME`, with header).

use crate::defaults::SPEAKERS_FILE;
use crate::error::{LibrittsError, Result};
use crate::model::{IdSet, Speaker};

const ID: usize = 0;
const GENDER: usize = 1;
const NAME: usize = 3;

/// Parse the speaker table, keeping only ids in `valid_speaker_ids`.
pub fn parse_speakers(content: &str, valid_speaker_ids: &IdSet) -> Result<Vec<Speaker>> {
    let mut speakers = Vec::new();

    for (idx, text) in content.lines().enumerate().skip(1) {
        let parts: Vec<&str> = text.split('\t').collect();
        let id = parts[ID].trim();
        if !valid_speaker_ids.contains(id) {
            continue;
        }

        let column = |index: usize, name: &str| {
            parts.get(index).map(|value| value.trim()).ok_or_else(|| {
                LibrittsError::malformed(
                    SPEAKERS_FILE,
                    idx + 1,
                    format!("missing column {index} ({name})"),
                )
            })
        };

        speakers.push(Speaker {
            id: id.to_string(),
            gender: column(GENDER, "gender")?.to_string(),
            name: column(NAME, "name")?.to_string(),
        });
    }

    Ok(speakers)
}
