//! Writes rendered scripts into the output root.

use crate::defaults::TRANSCRIPTION_SCRIPT_PREFIX;
use crate::error::Result;
use crate::sql::SqlScript;
use std::fs;
use std::path::{Path, PathBuf};

/// Remove transcription chunks left over from an earlier run.
///
/// A smaller corpus produces fewer chunks; stale higher-numbered files would
/// otherwise be loaded as well.
fn remove_stale_chunks(output_dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(output_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with(TRANSCRIPTION_SCRIPT_PREFIX)
            && name.ends_with(".sql")
            && entry.file_type()?.is_file()
        {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Write every script under `output_dir`, creating it if needed.
///
/// Returns the written paths in script order.
pub fn write_scripts(output_dir: &Path, scripts: &[SqlScript]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;

    let removed = remove_stale_chunks(output_dir)?;
    if removed > 0 {
        tracing::debug!(removed, "Removed stale transcription chunks");
    }

    let mut written = Vec::with_capacity(scripts.len());
    for script in scripts {
        let path = output_dir.join(&script.file_name);
        fs::write(&path, &script.contents)?;
        tracing::debug!(path = %path.display(), bytes = script.contents.len(), "Wrote script");
        written.push(path);
    }

    tracing::info!(
        scripts = written.len(),
        output = %output_dir.display(),
        "SQL scripts written"
    );
    Ok(written)
}
