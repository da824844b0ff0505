//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::cell::Cell;
use std::path::Path;

use git2::{Oid, Repository, Signature, Time};

/// Timestamp of the first commit; each later commit is one minute newer.
const BASE_TIME: i64 = 1_709_251_200; // 2024-03-01T00:00:00Z

/// Whether a `git` binary is available for subprocess-backed tests.
pub fn git_available() -> bool {
    which::which("git").is_ok()
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
    commits: Cell<i64>,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self {
            dir,
            repo,
            commits: Cell::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a commit by "Test User". Returns the commit OID.
    pub fn commit(&self, message: &str) -> Oid {
        self.commit_as(message, "Test User")
    }

    /// Create a commit with the given author name. Commit times strictly
    /// increase so history order is deterministic.
    pub fn commit_as(&self, message: &str, author: &str) -> Oid {
        let n = self.commits.get();
        self.commits.set(n + 1);
        let time = Time::new(BASE_TIME + n * 60, 0);
        let sig = Signature::new(author, "test@example.com", &time)
            .expect("Failed to create signature");

        let file_path = self.dir.path().join("test.txt");
        std::fs::write(&file_path, format!("{}\n{}", message, n)).expect("Failed to write test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_path(Path::new("test.txt"))
            .expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a lightweight tag pointing to the given OID.
    pub fn tag_lightweight(&self, name: &str, oid: Oid) {
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo
            .tag_lightweight(name, &obj, false)
            .expect("Failed to create lightweight tag");
    }

    /// Create an annotated tag pointing to the given OID.
    pub fn tag_annotated(&self, name: &str, oid: Oid, message: &str) {
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo
            .tag(name, &obj, &sig, message, false)
            .expect("Failed to create annotated tag");
    }
}
