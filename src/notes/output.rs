//! Emitting rendered release notes.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::OutputError;
use crate::git::CommitRecord;

use super::category::{Category, ClassifiedCommits};
use super::version::ReleaseVersion;

/// Machine-readable form of the release notes.
#[derive(Debug, Serialize)]
pub struct ReleaseSummary<'a> {
    pub version: &'a str,
    pub numeric: &'a str,
    pub release_date: String,
    pub categories: BTreeMap<Category, &'a [CommitRecord]>,
    pub contributors: Vec<&'a str>,
}

impl<'a> ReleaseSummary<'a> {
    pub fn new(version: &'a ReleaseVersion, classified: &'a ClassifiedCommits) -> Self {
        Self {
            version: &version.raw,
            numeric: &version.numeric,
            release_date: version.release_date(),
            categories: Category::ALL
                .into_iter()
                .map(|category| (category, classified.get(category)))
                .collect(),
            contributors: classified.contributors(),
        }
    }
}

/// Render the classified commits as pretty-printed JSON.
pub fn render_json(version: &ReleaseVersion, classified: &ClassifiedCommits) -> Result<String, OutputError> {
    serde_json::to_string_pretty(&ReleaseSummary::new(version, classified))
        .map_err(OutputError::SerializationFailed)
}

/// Write the document to `path`, or to stdout when no path is given.
///
/// File output goes through a temporary file in the same directory that is
/// renamed into place, so the target never holds a partial document.
pub fn emit(document: &str, path: Option<&Path>) -> Result<(), OutputError> {
    match path {
        Some(path) => write_atomic(path, document),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", document).map_err(OutputError::WriteFailed)?;
            stdout.flush().map_err(OutputError::WriteFailed)
        }
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), OutputError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|source| OutputError::TempFileFailed {
        path: path.display().to_string(),
        source,
    })?;
    file.write_all(contents.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    file.write_all(b"\n").map_err(OutputError::WriteFailed)?;
    file.persist(path).map_err(|e| OutputError::PersistFailed {
        path: path.display().to_string(),
        source: e.error,
    })?;

    Ok(())
}

/// One-line description of what was collected, for the log.
pub fn generate_summary(classified: &ClassifiedCommits) -> String {
    let counts = classified.count_by_category();
    if counts.is_empty() {
        return "No commits found, using routine update section".to_string();
    }

    let total = classified.len();
    let details: Vec<String> = counts
        .iter()
        .map(|(category, count)| format!("{}: {}", category.as_str(), count))
        .collect();
    let commit_word = if total == 1 { "commit" } else { "commits" };

    format!(
        "Classified {} {} ({})",
        total,
        commit_word,
        details.join(", ")
    )
}
