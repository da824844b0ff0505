//! Keyword-based commit classification.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::git::CommitRecord;

/// Release note sections, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Features,
    Fixes,
    Improvements,
    Docs,
    Chore,
    Other,
}

impl Category {
    /// Every category, highest priority first.
    pub const ALL: [Category; 6] = [
        Self::Features,
        Self::Fixes,
        Self::Improvements,
        Self::Docs,
        Self::Chore,
        Self::Other,
    ];

    /// Lowercase substrings that place a subject in this category.
    ///
    /// `Other` has none; it catches whatever nothing else matched.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Features => &["feat", "add", "new", "新增", "添加", "功能"],
            Self::Fixes => &["fix", "bug", "patch", "修复", "修正", "解决"],
            Self::Improvements => &[
                "improve", "enhance", "update", "refactor", "优化", "改进", "重构", "更新",
            ],
            Self::Docs => &["doc", "docs", "readme", "文档"],
            Self::Chore => &["chore", "build", "ci", "test", "构建", "测试"],
            Self::Other => &[],
        }
    }

    /// Markdown heading text for the section.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Features => "✨ New Features",
            Self::Fixes => "🐛 Bug Fixes",
            Self::Improvements => "🚀 Improvements",
            Self::Docs => "📚 Documentation",
            Self::Chore => "🧹 Maintenance",
            Self::Other => "🔧 Other Changes",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Features => "features",
            Self::Fixes => "fixes",
            Self::Improvements => "improvements",
            Self::Docs => "docs",
            Self::Chore => "chore",
            Self::Other => "other",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }

    /// Whether any of this category's keywords occurs in `subject_lower`.
    ///
    /// Plain substring search: "docs" matches inside "docstring" and "ci"
    /// matches inside "precision".
    fn matches(&self, subject_lower: &str) -> bool {
        self.keywords().iter().any(|kw| subject_lower.contains(kw))
    }
}

/// Pick the category for a commit subject. First match in priority order wins.
pub fn categorize(subject: &str) -> Category {
    let lower = subject.to_lowercase();
    Category::ALL
        .into_iter()
        .find(|category| category.matches(&lower))
        .unwrap_or(Category::Other)
}

/// Commits grouped by category, each group in history order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedCommits {
    groups: [Vec<CommitRecord>; 6],
}

impl ClassifiedCommits {
    pub fn push(&mut self, category: Category, commit: CommitRecord) {
        self.groups[category.index()].push(commit);
    }

    pub fn get(&self, category: Category) -> &[CommitRecord] {
        &self.groups[category.index()]
    }

    /// Non-empty categories in rendering order.
    pub fn non_empty(&self) -> impl Iterator<Item = (Category, &[CommitRecord])> {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
            .filter(|(_, commits)| !commits.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Distinct authors across every category, sorted.
    pub fn contributors(&self) -> Vec<&str> {
        self.groups
            .iter()
            .flatten()
            .map(|commit| commit.author.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Count commits by category for summary output.
    pub fn count_by_category(&self) -> Vec<(Category, usize)> {
        self.non_empty()
            .map(|(category, commits)| (category, commits.len()))
            .collect()
    }
}

/// Sort commits into categories, keeping their relative order.
pub fn classify(commits: impl IntoIterator<Item = CommitRecord>) -> ClassifiedCommits {
    let mut classified = ClassifiedCommits::default();
    for commit in commits {
        let category = categorize(&commit.subject);
        classified.push(category, commit);
    }
    classified
}
