//! Commit records and `git log` line parsing.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pretty format passed to `git log`: hash, subject, author name, author date.
pub const LOG_FORMAT: &str = "--pretty=format:%H|%s|%an|%ad";

/// Length of the abbreviated hash shown in release notes.
pub const SHORT_HASH_LEN: usize = 7;

const FIELD_SEPARATOR: char = '|';

/// A single commit as read from history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    pub short_hash: String,
    pub subject: String,
    pub author: String,
    /// Author date as `YYYY-MM-DD`.
    pub date: String,
}

impl CommitRecord {
    /// Build a record from its fields. Returns `None` if the hash is shorter
    /// than [`SHORT_HASH_LEN`] characters.
    pub fn new(
        hash: impl Into<String>,
        subject: impl Into<String>,
        author: impl Into<String>,
        date: impl Into<String>,
    ) -> Option<Self> {
        let hash = hash.into();
        let short_hash: String = hash.chars().take(SHORT_HASH_LEN).collect();
        if short_hash.chars().count() < SHORT_HASH_LEN {
            return None;
        }

        Some(Self {
            hash,
            short_hash,
            subject: subject.into(),
            author: author.into(),
            date: date.into(),
        })
    }
}

/// Parse one line of `git log` output produced with [`LOG_FORMAT`].
///
/// The hash is the first field and the date and author are the last two, so
/// a subject containing `|` survives intact. Lines with fewer than four
/// fields yield `None`.
pub fn parse_log_line(line: &str) -> Option<CommitRecord> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() < 4 {
        return None;
    }

    let last = fields.len() - 1;
    let hash = fields[0];
    let date = fields[last];
    let author = fields[last - 1];
    let subject = fields[1..last - 1].join("|");

    CommitRecord::new(hash, subject, author, date)
}

/// Parse the full output of `git log`, skipping blank and malformed lines.
pub fn parse_log_output(output: &str) -> Vec<CommitRecord> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parsed = parse_log_line(line);
            if parsed.is_none() {
                debug!(line = %line, "Skipping malformed log record");
            }
            parsed
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0123456789abcdef0123456789abcdef01234567";

    #[test]
    fn test_parse_well_formed_line() {
        let line = format!("{}|feat: add dark mode|bob|2024-03-01", HASH);
        let record = parse_log_line(&line).expect("line should parse");

        assert_eq!(record.hash, HASH);
        assert_eq!(record.short_hash, "0123456");
        assert_eq!(record.subject, "feat: add dark mode");
        assert_eq!(record.author, "bob");
        assert_eq!(record.date, "2024-03-01");
    }

    #[test]
    fn test_parse_too_few_fields() {
        assert!(parse_log_line(&format!("{}|subject|bob", HASH)).is_none());
        assert!(parse_log_line("just some text").is_none());
    }

    #[test]
    fn test_parse_subject_with_pipe() {
        let line = format!("{}|fix: a | b handling|alice|2024-03-02", HASH);
        let record = parse_log_line(&line).expect("line should parse");

        assert_eq!(record.subject, "fix: a | b handling");
        assert_eq!(record.author, "alice");
        assert_eq!(record.date, "2024-03-02");
    }

    #[test]
    fn test_parse_empty_subject() {
        let line = format!("{}||alice|2024-03-02", HASH);
        let record = parse_log_line(&line).expect("line should parse");
        assert_eq!(record.subject, "");
    }

    #[test]
    fn test_short_hash_is_first_seven_chars() {
        let record = CommitRecord::new("abcdefg", "s", "a", "2024-01-01").unwrap();
        assert_eq!(record.short_hash, "abcdefg");

        let record = CommitRecord::new(HASH, "s", "a", "2024-01-01").unwrap();
        assert_eq!(record.short_hash, &HASH[..7]);
    }

    #[test]
    fn test_hash_shorter_than_seven_is_rejected() {
        assert!(CommitRecord::new("abc", "s", "a", "2024-01-01").is_none());
        assert!(parse_log_line("abc|subject|bob|2024-01-01").is_none());
    }

    #[test]
    fn test_parse_output_skips_blank_and_malformed_lines() {
        let output = format!(
            "{h}|feat: one|bob|2024-01-01\n\nbroken line\n{h}|fix: two|alice|2024-01-02\n",
            h = HASH
        );
        let records = parse_log_output(&output);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].subject, "feat: one");
        assert_eq!(records[1].subject, "fix: two");
    }

    #[test]
    fn test_parse_output_empty() {
        assert!(parse_log_output("").is_empty());
    }
}
