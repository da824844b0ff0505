//! Release tags and version-aware ordering.

use std::cmp::Ordering;

use git2::{Oid, Repository};
use semver::Version;
use tracing::{debug, warn};

use crate::error::HistoryError;

/// A tag peeled to the commit it marks.
#[derive(Debug, Clone)]
pub struct TagInfo {
    pub name: String,
    /// Commit the tag points at, through any annotated tag object.
    pub commit: Oid,
    pub version: Option<Version>,
}

impl TagInfo {
    pub fn new(name: impl Into<String>, commit: Oid) -> Self {
        let name = name.into();
        let version = get_version_from_tag(&name);
        Self {
            name,
            commit,
            version,
        }
    }
}

/// List every tag that resolves to a commit.
///
/// Tags on trees or blobs, and names that are not UTF-8, are skipped.
pub fn get_all_tags(repo: &Repository) -> Result<Vec<TagInfo>, HistoryError> {
    let mut tags = Vec::new();

    repo.tag_foreach(|oid, name_bytes| {
        let Ok(full_name) = std::str::from_utf8(name_bytes) else {
            warn!(%oid, "Skipping tag whose name is not valid UTF-8");
            return true;
        };
        let name = full_name.strip_prefix("refs/tags/").unwrap_or(full_name);

        match repo.find_object(oid, None).and_then(|obj| obj.peel_to_commit()) {
            Ok(commit) => tags.push(TagInfo::new(name, commit.id())),
            Err(e) => debug!(tag = %name, error = %e, "Tag does not mark a commit"),
        }
        true
    })
    .map_err(HistoryError::RevwalkError)?;

    Ok(tags)
}

/// Extract semver version from a tag name.
/// Handles both "v1.2.3" and "1.2.3" formats.
pub fn get_version_from_tag(tag_name: &str) -> Option<Version> {
    let version_str = tag_name.strip_prefix('v').unwrap_or(tag_name);
    Version::parse(version_str).ok()
}

/// Newest release first.
///
/// Semver tags order by version, highest first. Tags that are not semver
/// come after all semver tags, in descending lexical order.
pub fn compare_desc(a: &TagInfo, b: &TagInfo) -> Ordering {
    match (&a.version, &b.version) {
        (Some(va), Some(vb)) => vb.cmp(va).then_with(|| b.name.cmp(&a.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.name.cmp(&a.name),
    }
}

/// Sort tags newest release first.
pub fn sort_desc(tags: &mut [TagInfo]) {
    tags.sort_by(compare_desc);
}
