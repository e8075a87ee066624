//! Transcoding loop.
//!
//! Best effort: a failed file is recorded and the batch moves on. A missing
//! transcoder program aborts the whole batch. With more than one worker, jobs
//! flow through a bounded channel to scoped threads.

use crate::audio::inventory::AudioJob;
use crate::audio::transcoder::Transcoder;
use crate::error::{LibrittsError, Result};
use crossbeam_channel::{bounded, unbounded};
use indicatif::ProgressBar;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// A file that could not be transcoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscodeFailure {
    pub source: PathBuf,
    pub message: String,
}

/// Outcome of a transcoding batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranscodeReport {
    pub converted: usize,
    /// Failures in job order.
    pub failures: Vec<TranscodeFailure>,
}

impl TranscodeReport {
    pub fn attempted(&self) -> usize {
        self.converted + self.failures.len()
    }
}

fn run_job<T: Transcoder + ?Sized>(job: &AudioJob, transcoder: &T) -> Result<()> {
    if let Some(parent) = job.target.parent() {
        fs::create_dir_all(parent)?;
    }
    transcoder.transcode(&job.source, &job.target)
}

/// Errors that no later job can recover from.
fn is_fatal(error: &LibrittsError) -> bool {
    matches!(error, LibrittsError::TranscoderNotFound { .. })
}

fn record(
    report: &mut TranscodeReport,
    failures: &mut Vec<(usize, TranscodeFailure)>,
    index: usize,
    job: &AudioJob,
    outcome: Result<()>,
) {
    match outcome {
        Ok(()) => report.converted += 1,
        Err(e) => {
            tracing::warn!(source = %job.source.display(), error = %e, "Transcode failed");
            failures.push((
                index,
                TranscodeFailure {
                    source: job.source.clone(),
                    message: e.to_string(),
                },
            ));
        }
    }
}

/// Transcode every job with up to `workers` threads.
///
/// The set of attempted files does not depend on `workers`; only the order
/// of execution does. Returns `TranscoderNotFound` as soon as any job reports
/// it, without starting further jobs.
pub fn transcode_all<T: Transcoder + ?Sized>(
    jobs: &[AudioJob],
    transcoder: &T,
    workers: usize,
    progress: &ProgressBar,
) -> Result<TranscodeReport> {
    let mut report = TranscodeReport::default();
    let mut failures = Vec::new();
    let workers = workers.clamp(1, jobs.len().max(1));

    if workers == 1 {
        for (index, job) in jobs.iter().enumerate() {
            match run_job(job, transcoder) {
                Err(e) if is_fatal(&e) => return Err(e),
                outcome => record(&mut report, &mut failures, index, job, outcome),
            }
            progress.inc(1);
        }
    } else {
        let (job_tx, job_rx) = bounded::<(usize, &AudioJob)>(workers * 2);
        let (result_tx, result_rx) = unbounded::<(usize, Result<()>)>();
        let abort = AtomicBool::new(false);
        let mut fatal = None;

        thread::scope(|scope| {
            let abort = &abort;
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    for (index, job) in job_rx.iter() {
                        if abort.load(Ordering::Relaxed) {
                            break;
                        }
                        let outcome = run_job(job, transcoder);
                        if let Err(e) = &outcome
                            && is_fatal(e)
                        {
                            abort.store(true, Ordering::Relaxed);
                        }
                        progress.inc(1);
                        if result_tx.send((index, outcome)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(job_rx);
            drop(result_tx);

            for entry in jobs.iter().enumerate() {
                if abort.load(Ordering::Relaxed) || job_tx.send(entry).is_err() {
                    break;
                }
            }
            drop(job_tx);

            for (index, outcome) in result_rx.iter() {
                match outcome {
                    Err(e) if is_fatal(&e) => {
                        fatal.get_or_insert(e);
                    }
                    outcome => record(&mut report, &mut failures, index, &jobs[index], outcome),
                }
            }
        });

        if let Some(e) = fatal {
            return Err(e);
        }
    }

    failures.sort_by_key(|(index, _)| *index);
    report.failures = failures.into_iter().map(|(_, failure)| failure).collect();
    Ok(report)
}
