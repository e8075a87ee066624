//! End-to-end conversion of an on-disk corpus with a mock transcoder.

mod common;

use chrono::NaiveDate;
use libritts_db::app::{RunOptions, Stages, run_convert, write_report};
use libritts_db::audio::transcoder::TranscoderSettings;
use libritts_db::config::Config;
use libritts_db::{
    CommandExecutor, FfmpegTranscoder, LibrittsError, RawCorpus, Result, reconcile,
};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Records invocations and writes the output file named by the last argument.
#[derive(Default)]
struct FakeFfmpeg {
    calls: Mutex<Vec<Vec<String>>>,
    fail_on: Option<&'static str>,
}

impl CommandExecutor for FakeFfmpeg {
    fn execute(&self, _command: &str, args: &[&OsStr]) -> Result<String> {
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        self.calls.lock().unwrap().push(args.clone());

        if let Some(needle) = self.fail_on
            && args[1].contains(needle)
        {
            return Err(LibrittsError::TranscodeFailed {
                message: "ffmpeg exited with exit status: 1: Invalid data".to_string(),
            });
        }
        fs::write(args.last().unwrap(), b"ID3")?;
        Ok(String::new())
    }
}

fn options(corpus: &Path, output: &Path, stages: Stages) -> RunOptions {
    RunOptions {
        corpus_root: corpus.to_path_buf(),
        output_root: output.to_path_buf(),
        stages,
        generated_on: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        show_progress: false,
    }
}

fn sorted_ids<'a>(ids: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut ids: Vec<&str> = ids.map(String::as_str).collect();
    ids.sort_unstable();
    ids
}

#[test]
fn test_reconcile_applies_every_filter() {
    let dir = common::corpus();
    let corpus = reconcile(&RawCorpus::load(dir.path()).unwrap()).unwrap();

    assert_eq!(sorted_ids(corpus.books.iter().map(|b| &b.id)), ["12", "7"]);
    assert_eq!(sorted_ids(corpus.speakers.iter().map(|s| &s.id)), ["19"]);
    assert_eq!(
        sorted_ids(corpus.chapters.iter().map(|c| &c.id)),
        ["198", "227"]
    );
    assert_eq!(corpus.transcriptions.len(), 3);

    let pride = corpus.books.iter().find(|b| b.id == "12").unwrap();
    assert_eq!(pride.title, "Pride and / Prejudice");
    assert_eq!(pride.author.as_deref(), Some("Jane Austen"));
    let tale = corpus.books.iter().find(|b| b.id == "7").unwrap();
    assert_eq!(tale.author, None);
}

#[test]
fn test_full_conversion_with_mock_transcoder() {
    let dir = common::corpus();
    let out = TempDir::new().unwrap();
    let transcoder = FfmpegTranscoder::new(FakeFfmpeg::default(), Default::default());

    let summary = run_convert(
        &Config::default(),
        &options(dir.path(), out.path(), Stages::All),
        &transcoder,
    )
    .unwrap();

    assert_eq!(summary.counts.chapters, 2);
    assert_eq!(
        summary.scripts,
        vec![
            out.path().join("01_schema.sql"),
            out.path().join("02_transcriptions_01.sql"),
            out.path().join("03_indexes.sql"),
        ]
    );

    let audio = summary.audio.unwrap();
    assert_eq!(audio.converted, 3);
    assert!(audio.failures.is_empty());
    for relative in [
        "train-clean-100/19/198/19_198_000000_000000.mp3",
        "train-clean-100/19/198/19_198_000001_000000.mp3",
        "train-clean-100/19/227/19_227_000000_000001.mp3",
    ] {
        assert!(out.path().join(relative).is_file(), "missing {relative}");
    }
    assert!(!out.path().join("dev-clean").exists());
}

#[test]
fn test_transcode_failure_is_reported_not_fatal() {
    let dir = common::corpus();
    let out = TempDir::new().unwrap();
    let transcoder = FfmpegTranscoder::new(
        FakeFfmpeg {
            fail_on: Some("19_227_"),
            ..Default::default()
        },
        Default::default(),
    );

    let mut config = Config::default();
    config.audio.jobs = 2;
    let summary = run_convert(
        &config,
        &options(dir.path(), out.path(), Stages::AudioOnly),
        &transcoder,
    )
    .unwrap();

    let audio = summary.audio.unwrap();
    assert_eq!(audio.converted, 2);
    assert_eq!(audio.failures.len(), 1);
    assert!(audio.failures[0].source.ends_with("19_227_000000_000001.wav"));
    assert!(audio.failures[0].message.contains("Invalid data"));
}

#[test]
fn test_missing_transcoder_program_aborts_the_run() {
    let dir = common::corpus();
    let out = TempDir::new().unwrap();
    let transcoder = FfmpegTranscoder::system(TranscoderSettings {
        program: "libritts-db-no-such-transcoder".to_string(),
        ..Default::default()
    });

    let mut config = Config::default();
    config.audio.jobs = 2;
    let err = run_convert(
        &config,
        &options(dir.path(), out.path(), Stages::All),
        &transcoder,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        LibrittsError::TranscoderNotFound { ref tool } if tool == "libritts-db-no-such-transcoder"
    ));
}

#[test]
fn test_output_is_byte_identical_across_runs() {
    let dir = common::corpus();
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let transcoder = FfmpegTranscoder::new(FakeFfmpeg::default(), Default::default());

    for out in [&first, &second] {
        run_convert(
            &Config::default(),
            &options(dir.path(), out.path(), Stages::SqlOnly),
            &transcoder,
        )
        .unwrap();
    }

    for name in ["01_schema.sql", "02_transcriptions_01.sql", "03_indexes.sql"] {
        assert_eq!(
            fs::read(first.path().join(name)).unwrap(),
            fs::read(second.path().join(name)).unwrap(),
            "{name} differs between runs"
        );
    }
}

#[test]
fn test_smaller_chunk_size_then_rerun_removes_stale_chunks() {
    let dir = common::corpus();
    let out = TempDir::new().unwrap();
    let transcoder = FfmpegTranscoder::new(FakeFfmpeg::default(), Default::default());

    let mut config = Config::default();
    config.sql.chunk_size = 2;
    let summary = run_convert(
        &config,
        &options(dir.path(), out.path(), Stages::SqlOnly),
        &transcoder,
    )
    .unwrap();
    assert_eq!(summary.scripts.len(), 4);
    let second = fs::read_to_string(out.path().join("02_transcriptions_02.sql")).unwrap();
    assert!(second.contains("-- -- Transcription chunk 2 of 2"));

    run_convert(
        &Config::default(),
        &options(dir.path(), out.path(), Stages::SqlOnly),
        &transcoder,
    )
    .unwrap();
    assert!(out.path().join("02_transcriptions_01.sql").is_file());
    assert!(!out.path().join("02_transcriptions_02.sql").exists());
}

#[test]
fn test_sql_only_never_invokes_transcoder() {
    let dir = common::corpus();
    let out = TempDir::new().unwrap();
    let transcoder = FfmpegTranscoder::new(FakeFfmpeg::default(), Default::default());

    let summary = run_convert(
        &Config::default(),
        &options(dir.path(), out.path(), Stages::SqlOnly),
        &transcoder,
    )
    .unwrap();

    assert!(summary.audio.is_none());
    let audio_files: Vec<PathBuf> = walk_mp3(out.path());
    assert!(audio_files.is_empty());
}

fn walk_mp3(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().is_some_and(|e| e == "mp3") {
                found.push(path);
            }
        }
    }
    found
}

#[test]
fn test_report_round_trips_through_json() {
    let dir = common::corpus();
    let out = TempDir::new().unwrap();
    let transcoder = FfmpegTranscoder::new(FakeFfmpeg::default(), Default::default());
    let summary = run_convert(
        &Config::default(),
        &options(dir.path(), out.path(), Stages::All),
        &transcoder,
    )
    .unwrap();

    let report = out.path().join("report.json");
    write_report(&report, &summary).unwrap();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(report).unwrap()).unwrap();

    assert_eq!(json["counts"]["transcriptions"], 3);
    assert_eq!(json["audio"]["converted"], 3);
    assert_eq!(json["scripts"].as_array().unwrap().len(), 3);
}

#[test]
fn test_missing_metadata_file_is_fatal() {
    let dir = common::corpus();
    fs::remove_file(dir.path().join("speakers.tsv")).unwrap();
    let out = TempDir::new().unwrap();
    let transcoder = FfmpegTranscoder::new(FakeFfmpeg::default(), Default::default());

    let err = run_convert(
        &Config::default(),
        &options(dir.path(), out.path(), Stages::All),
        &transcoder,
    )
    .unwrap_err();

    assert!(matches!(err, LibrittsError::MissingCorpusFile { ref path } if path.ends_with("speakers.tsv")));
    assert!(!out.path().join("01_schema.sql").exists());
}

#[test]
fn test_malformed_compound_id_is_fatal() {
    let dir = common::corpus();
    common::write(
        dir.path(),
        "train-clean-100/19/198/19_198.trans.tsv",
        "19_198_000000\tToo few parts\n",
    );
    let out = TempDir::new().unwrap();
    let transcoder = FfmpegTranscoder::new(FakeFfmpeg::default(), Default::default());

    let err = run_convert(
        &Config::default(),
        &options(dir.path(), out.path(), Stages::SqlOnly),
        &transcoder,
    )
    .unwrap_err();

    match err {
        LibrittsError::MalformedRecord {
            source_name, line, ..
        } => {
            assert_eq!(source_name, "train-clean-100/19/198/19_198.trans.tsv");
            assert_eq!(line, 1);
        }
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn test_non_numeric_chapter_id_aborts_emission() {
    let dir = common::corpus();
    common::write(
        dir.path(),
        "train-clean-100/19/19x/19_19x.trans.tsv",
        "19_19x_000000_000000\tBad id\n",
    );
    let mut chapters = common::CHAPTERS.to_string();
    chapters.push_str("19x |19 |1.0 | train-clean-100 | 1 |12 | Bad | Pride\n");
    common::write(dir.path(), "CHAPTERS.txt", &chapters);
    let out = TempDir::new().unwrap();
    let transcoder = FfmpegTranscoder::new(FakeFfmpeg::default(), Default::default());

    let err = run_convert(
        &Config::default(),
        &options(dir.path(), out.path(), Stages::SqlOnly),
        &transcoder,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        LibrittsError::InvalidNumber { table: "chapters", field: "id", .. }
    ));
}
