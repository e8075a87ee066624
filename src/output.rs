//! Terminal rendering of run summaries.
//!
//! Logs go to stderr through `tracing`; the summary is the user-facing
//! result of a run and is printed to stdout.

use crate::app::RunSummary;
use crate::audio::driver::TranscodeReport;
use owo_colors::OwoColorize;
use std::fmt::Write;

/// Failures listed individually before the rest are summarized.
const MAX_LISTED_FAILURES: usize = 10;

fn label(text: &str, color: bool) -> String {
    if color {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

fn render_audio(out: &mut String, report: &TranscodeReport, color: bool) {
    let converted = report.converted.to_string();
    let converted = if color {
        converted.green().to_string()
    } else {
        converted
    };
    let _ = write!(
        out,
        "  {} {} converted",
        label("Audio:", color),
        converted
    );

    if report.failures.is_empty() {
        out.push('\n');
        return;
    }

    let failed = format!("{} failed", report.failures.len());
    if color {
        let _ = writeln!(out, ", {}", failed.red());
    } else {
        let _ = writeln!(out, ", {failed}");
    }
    for failure in report.failures.iter().take(MAX_LISTED_FAILURES) {
        let marker = if color { "✗".red().to_string() } else { "✗".to_string() };
        let _ = writeln!(out, "    {marker} {}: {}", failure.source.display(), failure.message);
    }
    if report.failures.len() > MAX_LISTED_FAILURES {
        let _ = writeln!(
            out,
            "    ... and {} more",
            report.failures.len() - MAX_LISTED_FAILURES
        );
    }
}

/// Render `summary` as a short multi-line report.
pub fn render_summary(summary: &RunSummary, color: bool) -> String {
    let mut out = String::new();
    let counts = &summary.counts;

    let _ = writeln!(
        out,
        "  {}   {} books, {} speakers, {} chapters, {} transcriptions",
        label("Kept:", color),
        counts.books,
        counts.speakers,
        counts.chapters,
        counts.transcriptions
    );

    if !summary.scripts.is_empty() {
        let _ = writeln!(
            out,
            "  {}    {} scripts in {}",
            label("SQL:", color),
            summary.scripts.len(),
            summary.output_root.display()
        );
    }

    if let Some(report) = &summary.audio {
        render_audio(&mut out, report, color);
    }

    out
}

/// Print the summary to stdout.
pub fn print_summary(summary: &RunSummary, color: bool) {
    let heading = format!("Converted {}", summary.corpus_root.display());
    if color {
        println!("{}", heading.bold());
    } else {
        println!("{heading}");
    }
    print!("{}", render_summary(summary, color));
}
