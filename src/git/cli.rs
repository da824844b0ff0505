//! History provider backed by the system `git` binary.
//!
//! Runs two read-only queries: `git tag --sort=-version:refname` and
//! `git log` with a pipe-delimited pretty format.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::HistoryError;

use super::record::{CommitRecord, LOG_FORMAT, parse_log_output};
use super::{CommitRange, HistoryProvider};

/// Reads history by shelling out to `git` inside `repo_dir`.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_dir: PathBuf,
}

impl GitCli {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    /// Run a git subcommand and return its stdout.
    async fn run_git(&self, args: &[&str]) -> Result<String, HistoryError> {
        check_git_installed()?;

        let operation = args.first().copied().unwrap_or_default().to_string();
        debug!(args = ?args, dir = %self.repo_dir.display(), "Running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(HistoryError::SpawnFailed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            return Err(HistoryError::NonZeroExit {
                command: operation,
                code,
                stderr,
            });
        }

        String::from_utf8(output.stdout).map_err(|_| HistoryError::InvalidUtf8(operation))
    }
}

/// Check that `git` can be found on PATH.
pub fn check_git_installed() -> Result<(), HistoryError> {
    which::which("git")
        .map(|_| ())
        .map_err(|_| HistoryError::GitNotInstalled)
}

#[async_trait]
impl HistoryProvider for GitCli {
    async fn release_tags(&self) -> Result<Vec<String>, HistoryError> {
        let stdout = self.run_git(&["tag", "--sort=-version:refname"]).await?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    async fn commits(&self, range: &CommitRange) -> Result<Vec<CommitRecord>, HistoryError> {
        let rev_spec = range.rev_spec();
        let mut args = vec!["log"];
        if let Some(spec) = rev_spec.as_deref() {
            args.push(spec);
        }
        args.extend([LOG_FORMAT, "--date=short"]);

        let stdout = self.run_git(&args).await?;
        Ok(parse_log_output(&stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_outside_repository_is_an_error() {
        if check_git_installed().is_err() {
            return;
        }
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let git = GitCli::new(dir.path());

        let result = git.commits(&CommitRange::All).await;
        assert!(matches!(result, Err(HistoryError::NonZeroExit { .. })));
    }

    #[tokio::test]
    async fn test_missing_directory_is_a_spawn_error() {
        if check_git_installed().is_err() {
            return;
        }
        let git = GitCli::new("/definitely/not/a/real/dir");

        let result = git.release_tags().await;
        assert!(matches!(result, Err(HistoryError::SpawnFailed(_))));
    }
}
