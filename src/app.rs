//! Conversion entry point.
//!
//! Orchestrates the complete corpus conversion:
//! load → reconcile → emit SQL → transcode audio

use crate::audio::driver::{TranscodeReport, transcode_all};
use crate::audio::inventory::plan_jobs;
use crate::audio::transcoder::Transcoder;
use crate::config::Config;
use crate::corpus::RawCorpus;
use crate::error::Result;
use crate::model::{Corpus, EntityCounts};
use crate::reconcile::reconcile;
use crate::sql::{RenderOptions, render_all, write_scripts};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Which output stages a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stages {
    /// SQL scripts and transcoded audio.
    All,
    SqlOnly,
    AudioOnly,
}

impl Stages {
    pub fn writes_sql(self) -> bool {
        matches!(self, Stages::All | Stages::SqlOnly)
    }

    pub fn transcodes_audio(self) -> bool {
        matches!(self, Stages::All | Stages::AudioOnly)
    }
}

/// Per-run inputs that do not come from the configuration file.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub corpus_root: PathBuf,
    pub output_root: PathBuf,
    pub stages: Stages,
    pub generated_on: NaiveDate,
    pub show_progress: bool,
}

/// What a run produced. Serialized as the `--report` file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Tool version that produced the output.
    pub version: String,
    pub corpus_root: PathBuf,
    pub output_root: PathBuf,
    pub generated_on: NaiveDate,
    pub counts: EntityCounts,
    pub scripts: Vec<PathBuf>,
    pub audio: Option<TranscodeReport>,
}

/// Load and reconcile the corpus under `corpus_root`.
pub fn load_corpus(corpus_root: &Path) -> Result<Corpus> {
    tracing::info!(corpus = %corpus_root.display(), "Loading corpus");
    let raw = RawCorpus::load(corpus_root)?;
    reconcile(&raw)
}

/// Run the configured stages against one corpus.
///
/// Parse, reconcile and SQL errors abort the run, as does a missing
/// transcoder program. Individual transcode failures are collected in the
/// summary.
pub fn run_convert<T: Transcoder + ?Sized>(
    config: &Config,
    options: &RunOptions,
    transcoder: &T,
) -> Result<RunSummary> {
    config.validate()?;

    let corpus = load_corpus(&options.corpus_root)?;

    let scripts = if options.stages.writes_sql() {
        let render = RenderOptions {
            database_name: config.sql.database_name.clone(),
            chunk_size: config.sql.chunk_size,
            generated_on: options.generated_on,
        };
        let rendered = render_all(&corpus, &render)?;
        write_scripts(&options.output_root, &rendered)?
    } else {
        Vec::new()
    };

    let audio = if options.stages.transcodes_audio() {
        let jobs = plan_jobs(
            &options.corpus_root,
            &options.output_root,
            &corpus.chapter_ids(),
            &config.audio.extension,
        )?;
        let progress = progress_bar(jobs.len() as u64, options.show_progress);
        let report = transcode_all(&jobs, transcoder, config.audio.jobs, &progress);
        progress.finish_and_clear();
        let report = report?;
        tracing::info!(
            converted = report.converted,
            failed = report.failures.len(),
            "Audio transcoding finished"
        );
        Some(report)
    } else {
        None
    };

    Ok(RunSummary {
        version: crate::version_string(),
        corpus_root: options.corpus_root.clone(),
        output_root: options.output_root.clone(),
        generated_on: options.generated_on,
        counts: corpus.counts(),
        scripts,
        audio,
    })
}

/// Write `summary` as pretty JSON.
pub fn write_report(path: &Path, summary: &RunSummary) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    tracing::debug!(path = %path.display(), "Wrote run report");
    Ok(())
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}
