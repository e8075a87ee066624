//! Environment diagnostics.
//!
//! Verifies that the transcoder is installed and the corpus root has the
//! expected layout before a long conversion is started.

use crate::config::Config;
use crate::defaults::{BOOKS_FILE, CHAPTERS_FILE, SPEAKERS_FILE};
use std::path::Path;
use std::process::{Command, Stdio};

/// Result of a dependency check.
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Tool or file is present and usable
    Ok,
    /// Tool or file is not found
    NotFound,
    /// Present but with issues (e.g., tool exits non-zero)
    Warning(String),
}

impl CheckResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckResult::Ok)
    }
}

/// Check that `program` runs. ffmpeg takes a single-dash `-version`.
pub fn check_transcoder(program: &str) -> CheckResult {
    match Command::new(program)
        .arg("-version")
        .stdin(Stdio::null())
        .output()
    {
        Ok(output) if output.status.success() => CheckResult::Ok,
        Ok(output) => CheckResult::Warning(format!(
            "'{}' found but -version exited with {}",
            program, output.status
        )),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CheckResult::NotFound,
        Err(e) => CheckResult::Warning(format!("Error checking '{}': {}", program, e)),
    }
}

/// Check one of the top-level metadata files.
pub fn check_corpus_file(corpus_root: &Path, name: &str) -> CheckResult {
    let path = corpus_root.join(name);
    if path.is_file() {
        CheckResult::Ok
    } else if path.exists() {
        CheckResult::Warning(format!("{} is not a regular file", path.display()))
    } else {
        CheckResult::NotFound
    }
}

fn report(label: &str, result: &CheckResult, hint: &str) {
    print!("{label}: ");
    match result {
        CheckResult::Ok => println!("✓ OK"),
        CheckResult::NotFound => {
            println!("✗ NOT FOUND");
            if !hint.is_empty() {
                println!("  {hint}");
            }
        }
        CheckResult::Warning(msg) => println!("⚠ WARNING: {msg}"),
    }
}

/// Run all checks and print results. Returns true when nothing failed.
pub fn check_dependencies(config: &Config, corpus_root: &Path) -> bool {
    println!("Checking conversion prerequisites...\n");
    let mut healthy = true;

    print!("Configuration: ");
    match config.validate() {
        Ok(()) => println!("✓ OK"),
        Err(e) => {
            println!("✗ {e}");
            healthy = false;
        }
    }

    let transcoder = check_transcoder(&config.audio.transcoder);
    report(
        &format!("Transcoder ({})", config.audio.transcoder),
        &transcoder,
        "Install ffmpeg:\n    sudo apt install ffmpeg  (Debian/Ubuntu)\n    sudo pacman -S ffmpeg    (Arch)",
    );
    healthy &= transcoder.is_ok();

    println!("\nCorpus at {}:", corpus_root.display());
    for name in [BOOKS_FILE, CHAPTERS_FILE, SPEAKERS_FILE] {
        let result = check_corpus_file(corpus_root, name);
        report(&format!("  {name}"), &result, "");
        healthy &= result.is_ok();
    }

    println!();
    if healthy {
        println!("All checks passed.");
    } else {
        println!("Some checks failed; see above.");
    }
    healthy
}
