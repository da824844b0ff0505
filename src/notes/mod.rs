//! Commit classification and release notes rendering.

pub mod category;
pub mod compose;
pub mod output;
pub mod version;

pub use category::{Category, ClassifiedCommits, categorize, classify};
pub use compose::compose;
pub use output::{emit, generate_summary, render_json};
pub use version::ReleaseVersion;
