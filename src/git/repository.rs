//! History provider backed by libgit2.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use git2::{Commit, Repository, Sort};
use tracing::debug;

use crate::error::HistoryError;

use super::record::CommitRecord;
use super::tags::{TagInfo, get_all_tags, sort_desc};
use super::{CommitRange, HistoryProvider};

/// Reads history in-process with `git2`.
///
/// The repository is opened per query; `git2::Repository` is not `Sync`.
#[derive(Debug, Clone)]
pub struct Git2History {
    repo_dir: PathBuf,
}

impl Git2History {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    fn open(&self) -> Result<Repository, HistoryError> {
        Repository::open(&self.repo_dir).map_err(HistoryError::OpenRepository)
    }
}

#[async_trait]
impl HistoryProvider for Git2History {
    async fn release_tags(&self) -> Result<Vec<String>, HistoryError> {
        let repo = self.open()?;
        let mut tags = get_all_tags(&repo)?;
        sort_desc(&mut tags);
        Ok(tags.into_iter().map(|t| t.name).collect())
    }

    async fn commits(&self, range: &CommitRange) -> Result<Vec<CommitRecord>, HistoryError> {
        let repo = self.open()?;
        walk_commits(&repo, range)
    }
}

/// Walk commits in `range`, newest first.
pub fn walk_commits(repo: &Repository, range: &CommitRange) -> Result<Vec<CommitRecord>, HistoryError> {
    let mut revwalk = repo.revwalk().map_err(HistoryError::RevwalkError)?;
    revwalk
        .set_sorting(Sort::TIME)
        .map_err(HistoryError::RevwalkError)?;
    revwalk
        .push_head()
        .map_err(|e| HistoryError::ReferenceNotFound("HEAD".to_string(), e))?;

    if let CommitRange::Since(tag) = range {
        let boundary = find_tag(repo, tag)?;
        revwalk
            .hide(boundary.commit)
            .map_err(HistoryError::RevwalkError)?;
    }

    let mut records = Vec::new();
    for oid in revwalk {
        let oid = oid.map_err(HistoryError::RevwalkError)?;
        let commit = repo.find_commit(oid).map_err(HistoryError::RevwalkError)?;
        match record_from_commit(&commit) {
            Some(record) => records.push(record),
            None => debug!(%oid, "Skipping commit with unreadable metadata"),
        }
    }

    Ok(records)
}

/// Look up a tag by name among the tags that mark commits.
fn find_tag(repo: &Repository, name: &str) -> Result<TagInfo, HistoryError> {
    get_all_tags(repo)?
        .into_iter()
        .find(|tag| tag.name == name)
        .ok_or_else(|| {
            HistoryError::ReferenceNotFound(name.to_string(), git2::Error::from_str("Tag not found"))
        })
}

fn record_from_commit(commit: &Commit) -> Option<CommitRecord> {
    let author = commit.author();
    let date = author_date(&author.when())?;

    CommitRecord::new(
        commit.id().to_string(),
        commit.summary().unwrap_or(""),
        author.name().unwrap_or(""),
        date,
    )
}

/// Format a signature time the way `git log --date=short` does.
fn author_date(when: &git2::Time) -> Option<String> {
    let offset = FixedOffset::east_opt(when.offset_minutes() * 60)?;
    let utc = DateTime::from_timestamp(when.seconds(), 0)?;
    Some(utc.with_timezone(&offset).format("%Y-%m-%d").to_string())
}
