//! relnotes - A CLI tool that turns commit history into release notes.
//!
//! # Overview
//!
//! relnotes reads the commits made since the previous release tag, sorts
//! them into sections by keyword, and renders a Markdown release
//! announcement with download, installation and support boilerplate.

pub mod config;
pub mod error;
pub mod git;
pub mod notes;

// Re-export commonly used types
pub use config::NotesConfig;
pub use error::{HistoryError, OutputError};
pub use git::{CommitRange, CommitRecord, HistoryProvider, extract_commits};
pub use notes::{Category, ClassifiedCommits, ReleaseVersion, classify, compose};
