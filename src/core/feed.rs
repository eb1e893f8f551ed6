//! Thread feed shown under the hero.
//!
//! A feed file holds one thread per line:
//!
//! ```text
//! # comments and blank lines are skipped
//! 2024-05-01T12:00:00Z | alice | Why does the viewport snap back?
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    pub id: usize,
    pub title: String,
    pub author: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("cannot read feed {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected `timestamp | author | title`")]
    Malformed { line: usize },
    #[error("line {line}: empty {field}")]
    EmptyField { line: usize, field: &'static str },
    #[error("line {line}: bad timestamp: {source}")]
    Timestamp {
        line: usize,
        #[source]
        source: chrono::ParseError,
    },
}

pub fn load_feed(path: &Path) -> Result<Vec<Thread>, FeedError> {
    let contents = std::fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_feed(&contents)
}

pub fn parse_feed(contents: &str) -> Result<Vec<Thread>, FeedError> {
    let mut threads = Vec::new();
    for (idx, raw) in contents.lines().enumerate() {
        let line = idx + 1;
        let raw = raw.trim();
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }

        let mut parts = raw.splitn(3, '|').map(str::trim);
        let (Some(stamp), Some(author), Some(title)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(FeedError::Malformed { line });
        };
        if author.is_empty() {
            return Err(FeedError::EmptyField { line, field: "author" });
        }
        if title.is_empty() {
            return Err(FeedError::EmptyField { line, field: "title" });
        }
        let created = DateTime::parse_from_rfc3339(stamp)
            .map_err(|source| FeedError::Timestamp { line, source })?
            .with_timezone(&Utc);

        threads.push(Thread {
            id: threads.len(),
            title: title.to_string(),
            author: author.to_string(),
            created,
        });
    }
    Ok(threads)
}

/// Built-in feed used when no file is given.  Newest first.
pub fn demo_feed(now: DateTime<Utc>) -> Vec<Thread> {
    const ENTRIES: &[(i64, &str, &str)] = &[
        (4, "mira", "How do I keep scroll position after opening a thread?"),
        (35, "jonas", "Throttling wheel input without dropping the last event"),
        (90, "ana", "Smooth scroll keeps fighting my manual scrolling"),
        (180, "kofi", "Staggered entrance animations in a terminal UI"),
        (420, "lin", "What threshold should an intersection check use?"),
        (900, "sam", "Snapping between a hero section and a feed"),
        (1_500, "noor", "Restoring state when navigating back to a list"),
        (2_880, "eli", "Cancelling timers when a view goes away"),
        (4_320, "rui", "Measuring layout after a terminal resize"),
        (8_640, "ava", "Choosing a suppression window for programmatic scrolls"),
        (14_400, "ben", "Why direction detection must never skip a sample"),
        (30_000, "ivy", "Rendering opacity with only sixteen colours"),
    ];
    ENTRIES
        .iter()
        .enumerate()
        .map(|(id, &(minutes, author, title))| Thread {
            id,
            title: title.to_string(),
            author: author.to_string(),
            created: now - Duration::minutes(minutes),
        })
        .collect()
}

/// Short age label such as `"5m ago"` or `"3d ago"`.
pub fn relative_age(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now.signed_duration_since(created);
    if age < Duration::minutes(1) {
        "just now".to_string()
    } else if age < Duration::hours(1) {
        format!("{}m ago", age.num_minutes())
    } else if age < Duration::days(1) {
        format!("{}h ago", age.num_hours())
    } else if age < Duration::days(30) {
        format!("{}d ago", age.num_days())
    } else {
        created.format("%Y-%m-%d").to_string()
    }
}

/// Number of distinct authors, for the hero's stats line.
pub fn author_count(threads: &[Thread]) -> usize {
    let mut authors: Vec<&str> = threads.iter().map(|t| t.author.as_str()).collect();
    authors.sort_unstable();
    authors.dedup();
    authors.len()
}
