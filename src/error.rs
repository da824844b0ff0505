//! Error types for relnotes modules using thiserror.

use thiserror::Error;

/// Errors from reading commit history.
///
/// None of these are fatal to a run: [`crate::git::extract_commits`] turns
/// every one of them into an empty commit set.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("git executable not found on PATH")]
    GitNotInstalled,

    #[error("Failed to spawn git: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git {command} exited with code {code}: {stderr}")]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("git {0} produced output that is not valid UTF-8")]
    InvalidUtf8(String),

    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to find reference '{0}': {1}")]
    ReferenceNotFound(String, #[source] git2::Error),

    #[error("Failed to walk commit history: {0}")]
    RevwalkError(#[source] git2::Error),
}

/// Errors from emitting the rendered document.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create temporary file next to {path}: {source}")]
    TempFileFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write release notes: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Failed to move release notes into place at {path}: {source}")]
    PersistFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize release notes: {0}")]
    SerializationFailed(#[source] serde_json::Error),
}
