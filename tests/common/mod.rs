//! Shared on-disk corpus fixture for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const BOOKS: &str = "\
12|Pride and
Prejudice|Jane Austen
99|Orphan Book|Nobody
7|O'Brien's Tale|
";

pub const CHAPTERS: &str = "\
;ID |READER|MINUTES| SUBSET          | PROJ.|BOOK ID| CH. TITLE          | PROJECT TITLE
;
198 |19    |10.5   | train-clean-100 | 1    |12     | Chapter 1          | Pride
227 |19    |5      | train-clean-100 | 1    |7      | It's \"quoted\"      | Tale
300 |40    |2.25   | dev-clean       | 1    |55     | Lost chapter       | Gone
400 |88    |1.0    | dev-clean       | 1    |12     | Unknown speaker    | Pride
500 |19    |3.0    | dev-clean       | 1    |12     | No transcripts     | Pride
";

pub const SPEAKERS: &str = "\
READER\tGENDER\tSUBSET\tNAME
19\tF\ttrain-clean-100\tKara Shallenberg
40\tM\tdev-clean\tBob
77\tF\tdev-clean\tNever Read
";

/// (relative path, contents) of every transcription index.
pub const TRANSCRIPTS: &[(&str, &str)] = &[
    (
        "train-clean-100/19/198/19_198.trans.tsv",
        "19_198_000000_000000\tIt is a truth universally acknowledged.\n\
         19_198_000001_000000\tHowever little known, it's true.\n",
    ),
    (
        "train-clean-100/19/227/19_227.trans.tsv",
        "19_227_000000_000001\tO'Brien said 'no'.\n",
    ),
    (
        "dev-clean/40/300/40_300.trans.tsv",
        "40_300_000000_000000\tThis chapter has no book.\n",
    ),
    (
        "dev-clean/88/400/88_400.trans.tsv",
        "88_400_000000_000000\tThis reader is not in the table.\n",
    ),
];

/// Audio files on disk; only those of chapters 198 and 227 survive.
pub const WAVS: &[&str] = &[
    "train-clean-100/19/198/19_198_000000_000000.wav",
    "train-clean-100/19/198/19_198_000001_000000.wav",
    "train-clean-100/19/227/19_227_000000_000001.wav",
    "dev-clean/40/300/40_300_000000_000000.wav",
    "dev-clean/88/400/88_400_000000_000000.wav",
];

pub fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A small corpus exercising every filtering rule.
pub fn corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "BOOKS.txt", BOOKS);
    write(root, "CHAPTERS.txt", CHAPTERS);
    write(root, "speakers.tsv", SPEAKERS);
    for (path, contents) in TRANSCRIPTS {
        write(root, path, contents);
    }
    for path in WAVS {
        write(root, path, "RIFF");
    }
    dir
}
