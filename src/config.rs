//! Template configuration.
//!
//! The fixed parts of the release notes (project name, asset names, icon and
//! link targets) default to the values below and can be overridden through
//! environment variables.

use std::env;

use tracing::warn;

pub const PROJECT_NAME_ENV_VAR: &str = "RELNOTES_PROJECT_NAME";
pub const ASSET_PREFIX_ENV_VAR: &str = "RELNOTES_ASSET_PREFIX";
pub const ICON_PATH_ENV_VAR: &str = "RELNOTES_ICON_PATH";
pub const REPO_URL_ENV_VAR: &str = "RELNOTES_REPO_URL";

const DEFAULT_PROJECT_NAME: &str = "GitHub Folder Downloader";
const DEFAULT_ASSET_PREFIX: &str = "github-dir-download";
const DEFAULT_ICON_PATH: &str = "src/icon/icon-simple.svg";

/// Links are relative to the release page unless a repository URL is set.
const RELATIVE_LINK_BASE: &str = "../..";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesConfig {
    pub project_name: String,
    pub asset_prefix: String,
    pub icon_path: String,
    /// Absolute repository URL, e.g. `https://github.com/owner/repo`.
    pub repo_url: Option<String>,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            asset_prefix: DEFAULT_ASSET_PREFIX.to_string(),
            icon_path: DEFAULT_ICON_PATH.to_string(),
            repo_url: None,
        }
    }
}

impl NotesConfig {
    /// Defaults overridden by any `RELNOTES_*` variables that are set.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            project_name: env_override(PROJECT_NAME_ENV_VAR).unwrap_or(defaults.project_name),
            asset_prefix: env_override(ASSET_PREFIX_ENV_VAR).unwrap_or(defaults.asset_prefix),
            icon_path: env_override(ICON_PATH_ENV_VAR).unwrap_or(defaults.icon_path),
            repo_url: env_override(REPO_URL_ENV_VAR)
                .map(|url| url.trim_end_matches('/').to_string()),
        }
    }

    /// Base that commit, download and issue links hang off.
    pub fn link_base(&self) -> &str {
        self.repo_url.as_deref().unwrap_or(RELATIVE_LINK_BASE)
    }

    pub fn commit_link(&self, short_hash: &str) -> String {
        format!("{}/commit/{}", self.link_base(), short_hash)
    }

    pub fn download_link(&self, tag: &str, filename: &str) -> String {
        format!("{}/releases/download/{}/{}", self.link_base(), tag, filename)
    }

    pub fn universal_asset(&self, numeric: &str) -> String {
        format!("{}-{}-universal.zip", self.asset_prefix, numeric)
    }

    pub fn source_asset(&self, numeric: &str) -> String {
        format!("{}-{}-source.zip", self.asset_prefix, numeric)
    }
}

/// Read an override, ignoring unset and blank values.
fn env_override(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        Ok(_) => {
            warn!("{} is set but empty, using default", name);
            None
        }
        Err(env::VarError::NotUnicode(_)) => {
            warn!("{} is not valid UTF-8, using default", name);
            None
        }
        Err(env::VarError::NotPresent) => None,
    }
}
