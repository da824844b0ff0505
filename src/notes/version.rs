//! Release version label and dates.

use chrono::{DateTime, Local};

/// The version being released, as given on the command line.
#[derive(Debug, Clone)]
pub struct ReleaseVersion {
    /// Label exactly as passed, e.g. `v1.2.3`.
    pub raw: String,
    /// Label with one leading `v` removed, used in asset filenames.
    pub numeric: String,
    /// When the notes were generated.
    pub generated_at: DateTime<Local>,
}

impl ReleaseVersion {
    /// Create a version stamped with the current local time.
    pub fn new(raw: impl Into<String>) -> Self {
        Self::at(raw, Local::now())
    }

    /// Create a version stamped with a fixed time.
    pub fn at(raw: impl Into<String>, generated_at: DateTime<Local>) -> Self {
        let raw = raw.into();
        let numeric = numeric_version(&raw).to_string();
        Self {
            raw,
            numeric,
            generated_at,
        }
    }

    /// Release date as `YYYY-MM-DD`.
    pub fn release_date(&self) -> String {
        self.generated_at.format("%Y-%m-%d").to_string()
    }

    /// Generation timestamp as `YYYY-MM-DD HH:MM:SS`.
    pub fn generated_at_display(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Strip a single leading `v` from a version label.
pub fn numeric_version(raw: &str) -> &str {
    raw.strip_prefix('v').unwrap_or(raw)
}
