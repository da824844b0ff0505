//! Commit history extraction.
//!
//! History is read through the [`HistoryProvider`] trait so the release
//! pipeline can run against the `git` binary ([`GitCli`]), libgit2
//! ([`Git2History`]) or a mock in tests.

pub mod cli;
pub mod record;
pub mod repository;
pub mod tags;

pub use cli::GitCli;
pub use record::{CommitRecord, parse_log_line, parse_log_output};
pub use repository::Git2History;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::HistoryError;

/// Which commits to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitRange {
    /// Everything reachable from HEAD.
    All,
    /// Commits after the given tag, up to and including HEAD.
    Since(String),
}

impl CommitRange {
    /// Revision argument for `git log`, if the range is bounded.
    pub fn rev_spec(&self) -> Option<String> {
        match self {
            Self::All => None,
            Self::Since(tag) => Some(format!("{}..HEAD", tag)),
        }
    }
}

/// Source of release tags and commits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// All tag names, newest release first.
    async fn release_tags(&self) -> Result<Vec<String>, HistoryError>;

    /// Commits in `range`, newest first.
    async fn commits(&self, range: &CommitRange) -> Result<Vec<CommitRecord>, HistoryError>;
}

/// Pick the range covering everything since the previous release.
///
/// With two or more tags the lower bound is the second newest tag; the
/// newest is assumed to mark the release being prepared. Otherwise every
/// commit is in range.
pub fn select_range(tags: &[String]) -> CommitRange {
    match tags {
        [latest, previous, ..] if !latest.is_empty() => CommitRange::Since(previous.clone()),
        _ => CommitRange::All,
    }
}

/// Read the commits made since the previous release tag.
///
/// Never fails: any history error is logged and treated as "no commits".
pub async fn extract_commits<P>(provider: &P) -> Vec<CommitRecord>
where
    P: HistoryProvider + ?Sized,
{
    match try_extract_commits(provider).await {
        Ok(commits) => {
            info!(count = commits.len(), "Collected commits");
            commits
        }
        Err(e) => {
            warn!(error = %e, "Could not read commit history, continuing with no commits");
            Vec::new()
        }
    }
}

async fn try_extract_commits<P>(provider: &P) -> Result<Vec<CommitRecord>, HistoryError>
where
    P: HistoryProvider + ?Sized,
{
    let tags = provider.release_tags().await?;
    let range = select_range(&tags);
    debug!(tags = tags.len(), range = ?range, "Resolved commit range");
    provider.commits(&range).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn record(subject: &str) -> CommitRecord {
        CommitRecord::new("0123456789abcdef", subject, "bob", "2024-01-01").unwrap()
    }

    #[test]
    fn test_select_range_no_tags() {
        assert_eq!(select_range(&[]), CommitRange::All);
    }

    #[test]
    fn test_select_range_single_tag() {
        assert_eq!(select_range(&tags(&["v1.0.0"])), CommitRange::All);
    }

    #[test]
    fn test_select_range_uses_previous_tag() {
        assert_eq!(
            select_range(&tags(&["v1.1.0", "v1.0.0", "v0.9.0"])),
            CommitRange::Since("v1.0.0".to_string())
        );
    }

    #[test]
    fn test_select_range_empty_latest_tag() {
        assert_eq!(select_range(&tags(&["", "v1.0.0"])), CommitRange::All);
    }

    #[test]
    fn test_rev_spec() {
        assert_eq!(CommitRange::All.rev_spec(), None);
        assert_eq!(
            CommitRange::Since("v1.0.0".to_string()).rev_spec(),
            Some("v1.0.0..HEAD".to_string())
        );
    }

    #[tokio::test]
    async fn test_extract_commits_queries_since_previous_tag() {
        let mut mock = MockHistoryProvider::new();
        mock.expect_release_tags()
            .times(1)
            .returning(|| Ok(vec!["v1.1.0".to_string(), "v1.0.0".to_string()]));
        mock.expect_commits()
            .withf(|range| *range == CommitRange::Since("v1.0.0".to_string()))
            .times(1)
            .returning(|_| Ok(vec![record("feat: add dark mode")]));

        let commits = extract_commits(&mock).await;
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].subject, "feat: add dark mode");
    }

    #[tokio::test]
    async fn test_extract_commits_without_tags_reads_everything() {
        let mut mock = MockHistoryProvider::new();
        mock.expect_release_tags().returning(|| Ok(Vec::new()));
        mock.expect_commits()
            .withf(|range| *range == CommitRange::All)
            .times(1)
            .returning(|_| Ok(vec![record("initial"), record("second")]));

        let commits = extract_commits(&mock).await;
        assert_eq!(commits.len(), 2);
    }

    #[tokio::test]
    async fn test_extract_commits_tag_failure_yields_empty() {
        let mut mock = MockHistoryProvider::new();
        mock.expect_release_tags()
            .returning(|| Err(HistoryError::GitNotInstalled));
        mock.expect_commits().times(0);

        assert!(extract_commits(&mock).await.is_empty());
    }

    #[tokio::test]
    async fn test_extract_commits_log_failure_yields_empty() {
        let mut mock = MockHistoryProvider::new();
        mock.expect_release_tags().returning(|| Ok(Vec::new()));
        mock.expect_commits().returning(|_| {
            Err(HistoryError::NonZeroExit {
                command: "log".to_string(),
                code: 128,
                stderr: "fatal: not a git repository".to_string(),
            })
        });

        assert!(extract_commits(&mock).await.is_empty());
    }
}
